// crates/ztex-cli/src/io/mod.rs

pub mod gcode_file;
