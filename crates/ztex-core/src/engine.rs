// crates/ztex-core/src/engine.rs
//
// Two explicit stages: sample-and-normalize over the whole document, then the
// rewrite pass. Global min/max is only known once every height was sampled.

use log::{debug, info};

use crate::config::config::{Config, Mode};
use crate::config::fingerprint::settings_id_hex;
use crate::error::Result;
use crate::field::mix_cycle::MixCycle;
use crate::field::samples::{mix_samples, wood_samples};
use crate::field::wood::WoodField;
use crate::gcode::document::Document;
use crate::gcode::height;
use crate::rewrite::mix::MixModulator;
use crate::rewrite::wood::WoodModulator;
use crate::rewrite::{rewrite, Rewritten, RunInfo};
use crate::validate::validate_config;

/// Receives `(completed, total)` line counts during the rewrite pass.
pub trait Progress {
    fn update(&mut self, done: usize, total: usize);
}

/// Progress sink that ignores updates.
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&mut self, _done: usize, _total: usize) {}
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn update(&mut self, done: usize, total: usize) {
        (*self)(done, total)
    }
}

#[derive(Clone, Debug)]
pub struct RunReport {
    pub mode: &'static str,
    pub settings_id: String,
    pub max_height: f64,
    /// Heights sampled by the first pass.
    pub samples: usize,
    pub events: usize,
    pub inserted: usize,
    pub dropped: usize,
    pub lines_in: usize,
    pub lines_out: usize,
}

pub fn process(doc: &Document, cfg: &Config, stamp: &str) -> Result<(Document, RunReport)> {
    process_with_progress(doc, cfg, stamp, &mut NoProgress)
}

/// Run both passes over `doc`. `stamp` is the generation time written into
/// the header (the only line that differs between two identical runs).
///
/// Nothing is returned unless the whole document was rewritten.
pub fn process_with_progress(
    doc: &Document,
    cfg: &Config,
    stamp: &str,
    progress: &mut dyn Progress,
) -> Result<(Document, RunReport)> {
    let cfg = validate_config(cfg)?;
    let info = RunInfo {
        settings_id: settings_id_hex(&cfg),
        stamp: stamp.to_string(),
    };
    let lines: &[String] = &doc.lines;
    let max_z = height::max_height(lines);
    debug!("max height {max_z:.3}mm over {} lines", lines.len());

    let (out, samples): (Rewritten, usize) = match &cfg.mode {
        Mode::Temperature(w) => {
            let field = WoodField::new(cfg.seed, w);
            let (samples, stats) = wood_samples(lines, &field, w.skip_start_z);
            debug!(
                "wood field: {} heights, raw range [{:.4}, {:.4}]",
                samples.len(),
                stats.min,
                stats.max
            );
            let mut m = WoodModulator::new(w, &samples, info.clone(), cfg.scan_for_z_hop);
            let out = rewrite(lines, &mut m, max_z, cfg.scan_for_z_hop, progress);
            (out, samples.len())
        }
        Mode::Ratio(p) => {
            let cycle = MixCycle::from_seed(p.channels, p.mix_speed, cfg.seed);
            debug!(
                "mix cycle: speeds {:?} phases {:?}",
                cycle.speeds(),
                cycle.phases_deg()
            );
            let samples = mix_samples(lines, &cycle);
            let mut m = MixModulator::new(p, &samples, max_z, info.clone());
            let out = rewrite(lines, &mut m, max_z, cfg.scan_for_z_hop, progress);
            (out, samples.len())
        }
    };

    let report = RunReport {
        mode: cfg.mode.name(),
        settings_id: info.settings_id,
        max_height: max_z,
        samples,
        events: out.events,
        inserted: out.inserted,
        dropped: out.dropped,
        lines_in: lines.len(),
        lines_out: out.lines.len(),
    };
    info!(
        "{} rewrite: {} events, {} commands inserted, {} stale lines dropped",
        report.mode, report.events, report.inserted, report.dropped
    );

    Ok((Document::new(out.lines, doc.eol), report))
}
