// crates/ztex-core/src/gcode/mod.rs

pub mod document;
pub mod height;
pub mod markers;
pub mod scan;
