// crates/ztex-cli/src/cmd/common.rs
//
// Shared by both subcommands: input/output resolution, option overrides and
// the run itself.

use anyhow::Context;
use clap::Args;
use log::debug;
use ztex_core::{process_with_progress, Config, RunReport};

use crate::io::gcode_file;

#[derive(Args)]
pub struct FileArgs {
    /// G-code file to process
    #[arg(long)]
    pub file: String,

    /// Output path. If omitted, the input file is rewritten in place.
    #[arg(long)]
    pub out: Option<String>,

    /// Lines scanned ahead for a Z-hop before committing a change (0..=5)
    #[arg(long, default_value_t = 5)]
    pub scan_for_z_hop: usize,

    /// Extra option by name, e.g. --set maxTemp=235 (repeatable, applied last)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

impl FileArgs {
    pub fn out_path(&self) -> &str {
        self.out.as_deref().unwrap_or(&self.file)
    }

    pub fn apply_overrides(&self, cfg: &mut Config) -> anyhow::Result<()> {
        cfg.scan_for_z_hop = self.scan_for_z_hop;
        for pair in &self.set {
            cfg.set_pair(pair)
                .with_context(|| format!("--set {pair}"))?;
        }
        Ok(())
    }
}

/// Local generation time written into the header comment.
pub fn stamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M").to_string()
}

/// Read, process, write. Nothing is written unless processing succeeded.
pub fn run_file(files: &FileArgs, cfg: &Config) -> anyhow::Result<RunReport> {
    let doc = gcode_file::read_document(&files.file)?;

    let mut last_pct = 0usize;
    let mut on_progress = |done: usize, total: usize| {
        let pct = if total == 0 { 100 } else { done * 100 / total };
        if pct >= last_pct + 10 {
            last_pct = pct;
            debug!("rewrite {pct}% ({done}/{total} lines)");
        }
    };
    let (out, report) = process_with_progress(&doc, cfg, &stamp(), &mut on_progress)
        .with_context(|| format!("process {}", files.file))?;

    gcode_file::write_document(files.out_path(), &out)?;
    Ok(report)
}
