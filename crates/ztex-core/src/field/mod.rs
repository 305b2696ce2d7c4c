// crates/ztex-core/src/field/mod.rs

pub mod mix_cycle;
pub mod perlin;
pub mod rng;
pub mod samples;
pub mod wood;
