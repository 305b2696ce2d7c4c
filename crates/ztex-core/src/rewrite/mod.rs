// crates/ztex-core/src/rewrite/mod.rs
//
// Second pass: one forward walk over the document. Stale output of earlier
// runs is dropped, modulation commands are inserted right before the move
// that reaches a new sampled height, everything else is copied verbatim.

pub mod diag;
pub mod mix;
pub mod wood;
pub mod zhop;

use crate::engine::Progress;
use crate::gcode::height;
use crate::gcode::markers::{classify, LineKind, StaleCommands};

/// Mode-specific half of the rewrite: what to insert and where it came from.
pub trait Modulator {
    /// Pre-existing commands this modulator supersedes.
    fn superseded(&self) -> StaleCommands;

    /// Whether the first pass produced a sample for height `z`.
    fn sampled(&self, z: f64) -> bool;

    /// Leading lines of the output (descriptive comment, warm-up block).
    fn header(&mut self) -> Vec<String>;

    /// Lines replayed once after a `; set extruder` marker.
    fn replay_after_tool_change(&mut self) -> Vec<String> {
        Vec::new()
    }

    /// Commit a modulation event at `z`; returns the commands to insert.
    fn commit(&mut self, z: f64) -> Vec<String>;

    /// Diagnostics appended after the last line.
    fn trailer(&mut self) -> Vec<String>;
}

/// Identification written into the header comment.
#[derive(Clone, Debug, Default)]
pub struct RunInfo {
    pub settings_id: String,
    /// Generation time as text; empty leaves it out.
    pub stamp: String,
}

impl RunInfo {
    pub fn suffix(&self) -> String {
        if self.stamp.is_empty() {
            format!("settings {}", self.settings_id)
        } else {
            format!("settings {} - generated on {}", self.settings_id, self.stamp)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rewritten {
    pub lines: Vec<String>,
    /// Heights at which the modulator committed.
    pub events: usize,
    /// Command lines inserted inline (header and trailer excluded).
    pub inserted: usize,
    /// Stale or superseded lines removed.
    pub dropped: usize,
}

pub fn rewrite<S: AsRef<str>>(
    lines: &[S],
    m: &mut dyn Modulator,
    max_z: f64,
    z_hop_window: usize,
    progress: &mut dyn Progress,
) -> Rewritten {
    let total = lines.len();
    let stale = m.superseded();
    let mut out = Rewritten {
        lines: Vec::with_capacity(total + 64),
        ..Default::default()
    };
    out.lines.extend(m.header());

    let mut this_z = -1.0;
    let mut former_z = -1.0;
    let mut hop = zhop::HopTracker::new(z_hop_window);

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        match classify(line, stale) {
            LineKind::ToolChange => {
                out.lines.push(line.to_string());
                let replay = m.replay_after_tool_change();
                out.inserted += replay.len();
                out.lines.extend(replay);
            }
            LineKind::StaleAnnotation => out.dropped += 1,
            // Past the top, keep the end scripts exactly as they were.
            _ if this_z == max_z => out.lines.push(line.to_string()),
            LineKind::Superseded => out.dropped += 1,
            LineKind::Move(_) | LineKind::Unrecognized => {
                let declared = height::move_z(line);
                hop.observe(declared);
                this_z = declared.unwrap_or(former_z);
                if this_z != former_z && m.sampled(this_z) && !hop.is_return(this_z) {
                    if zhop::z_hop_ahead(lines, index, this_z, z_hop_window, stale) {
                        hop.vetoed(this_z);
                    } else {
                        let cmds = m.commit(this_z);
                        out.inserted += cmds.len();
                        out.lines.extend(cmds);
                        out.events += 1;
                        former_z = this_z;
                    }
                }
                out.lines.push(line.to_string());
            }
        }
        progress.update(index + 1, total);
    }

    out.lines.extend(m.trailer());
    out
}
