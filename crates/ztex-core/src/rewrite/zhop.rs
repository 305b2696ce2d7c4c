// crates/ztex-core/src/rewrite/zhop.rs

use crate::config::defaults::MAX_Z_HOP_SCAN;
use crate::gcode::height;
use crate::gcode::markers::{is_ours, is_stale_command, StaleCommands};

/// True when a move below `z` shows up within `window` lines from `index`
/// (the candidate line included), i.e. `z` is a short raise, not a layer.
///
/// Lines the rewrite drops (earlier annotations, superseded commands) do not
/// count toward the window, so the decision is the same on a fresh file and
/// on its processed output.
pub fn z_hop_ahead<S: AsRef<str>>(
    lines: &[S],
    index: usize,
    z: f64,
    window: usize,
    stale: StaleCommands,
) -> bool {
    let window = window.min(MAX_Z_HOP_SCAN);
    lines
        .iter()
        .skip(index)
        .map(|l| l.as_ref())
        .filter(|l| !is_ours(l) && !is_stale_command(l, stale))
        .take(window)
        .any(|l| height::height_of(l, z) < z)
}

/// Remembers a height vetoed as a hop so the move back up to it, after the
/// dip, is not taken for a new layer either.
///
/// The hop stays open for `window` lines after the veto and after every move
/// that dips below it; lines are counted as the rewrite sees them.
#[derive(Clone, Copy, Debug)]
pub struct HopTracker {
    window: usize,
    open: Option<(f64, usize)>,
}

impl HopTracker {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.min(MAX_Z_HOP_SCAN),
            open: None,
        }
    }

    /// Advance by one line; `declared` is the Z the line itself moves to.
    pub fn observe(&mut self, declared: Option<f64>) {
        if let Some((h, left)) = self.open {
            self.open = match declared {
                Some(z) if z < h => Some((h, self.window)),
                _ if left > 1 => Some((h, left - 1)),
                _ => None,
            };
        }
    }

    pub fn vetoed(&mut self, z: f64) {
        self.open = Some((z, self.window));
    }

    /// True when `z` returns to the height of a hop still open.
    pub fn is_return(&self, z: f64) -> bool {
        matches!(self.open, Some((h, _)) if h == z)
    }
}
