// crates/ztex-core/src/gcode/markers.rs
//
// Everything this tool writes into a program carries the `;ztex` tag, either
// as the leading comment (header, trailer) or as a trailing comment on an
// inserted command. Re-processing drops every tagged line before doing
// anything else, so a processed file can be processed again without stacking.

use crate::gcode::height;

pub const TAG: &str = ";ztex";
pub const GRAPH_PREFIX: &str = ";ztex-graph:";
pub const PLOT_PREFIX: &str = ";ztex-plot";

/// Firmware-specific line after which the warm-up block is replayed.
const SET_EXTRUDER: &str = "; set extruder ";

/// Pre-existing commands that would fight the modulation and are removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaleCommands {
    /// `M104` heater settings.
    Temperature,
    /// `M163` ratio and `M164` commit commands.
    Ratio,
    /// Bare `T<n>` tool selects.
    Tools,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineKind {
    /// `G0`/`G1`, with its Z when declared.
    Move(Option<f64>),
    /// Output of an earlier run; always dropped.
    StaleAnnotation,
    /// Pre-existing command this run replaces; dropped while modulating.
    Superseded,
    /// The `; set extruder` marker.
    ToolChange,
    Unrecognized,
}

/// Append the tag to an inserted command.
pub fn tagged(cmd: &str) -> String {
    format!("{cmd} {TAG}")
}

/// Header or trailer comment line (already starting with `;`), tagged.
pub fn tagged_comment(text: &str) -> String {
    format!("{TAG} {text}")
}

pub fn is_ours(line: &str) -> bool {
    let t = line.trim().to_ascii_lowercase();
    t.starts_with(TAG) || t.ends_with(TAG)
}

/// Code part of a line: everything before `;`, trimmed.
fn code(line: &str) -> &str {
    match line.find(';') {
        Some(i) => line[..i].trim(),
        None => line.trim(),
    }
}

fn first_word(line: &str) -> &str {
    code(line).split_whitespace().next().unwrap_or("")
}

pub fn is_stale_command(line: &str, stale: StaleCommands) -> bool {
    let w = first_word(line);
    match stale {
        StaleCommands::Temperature => w.eq_ignore_ascii_case("M104"),
        StaleCommands::Ratio => w.eq_ignore_ascii_case("M163") || w.eq_ignore_ascii_case("M164"),
        StaleCommands::Tools => {
            let c = code(line);
            let mut chars = c.chars();
            matches!(chars.next(), Some('T') | Some('t')) && chars.all(|ch| ch.is_ascii_digit())
        }
    }
}

pub fn is_set_extruder(line: &str) -> bool {
    line.to_ascii_lowercase().contains(SET_EXTRUDER)
}

pub fn classify(line: &str, stale: StaleCommands) -> LineKind {
    if is_set_extruder(line) {
        LineKind::ToolChange
    } else if is_ours(line) {
        LineKind::StaleAnnotation
    } else if is_stale_command(line, stale) {
        LineKind::Superseded
    } else if height::is_move(line) {
        LineKind::Move(height::move_z(line))
    } else {
        LineKind::Unrecognized
    }
}
