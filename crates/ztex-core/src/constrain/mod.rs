// crates/ztex-core/src/constrain/mod.rs

pub mod ratio;
pub mod temp;
