// crates/ztex-cli/src/cmd/mod.rs

pub mod common;
pub mod mix;
pub mod wood;
