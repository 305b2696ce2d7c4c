pub mod error;
pub mod validate;

pub mod config;
pub mod constrain;
pub mod engine;
pub mod field;
pub mod gcode;
pub mod rewrite;

pub use crate::config::config::{CarryPolicy, Config, MixParams, Mode, WoodParams};
pub use crate::engine::{process, process_with_progress, NoProgress, Progress, RunReport};
pub use crate::gcode::document::{Document, Eol};
