// crates/ztex-core/src/config/mod.rs

#[allow(clippy::module_inception)]
pub mod config;
pub mod defaults;
pub mod fingerprint;
pub mod keyed;
