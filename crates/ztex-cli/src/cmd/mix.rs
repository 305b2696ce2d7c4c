// crates/ztex-cli/src/cmd/mix.rs

use clap::Args;
use ztex_core::config::defaults::default_ratio_config;

use crate::cmd::common::{run_file, FileArgs};

#[derive(Args)]
pub struct MixArgs {
    #[command(flatten)]
    pub files: FileArgs,

    /// Number of mixed materials
    #[arg(long, default_value_t = 3)]
    pub mix: usize,

    /// Switch among this many tools instead of mixing (0 mixes)
    #[arg(long, default_value_t = 0)]
    pub extruders: usize,

    /// Higher values give thinner bands
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    #[arg(long, default_value_t = 2)]
    pub random_seed: u64,

    /// Append tab-separated plot records after the graph
    #[arg(long)]
    pub plot: bool,
}

pub fn run(args: MixArgs) -> anyhow::Result<()> {
    let mut cfg = default_ratio_config();
    cfg.seed = args.random_seed;
    if let Some(m) = cfg.mix_mut() {
        m.channels = args.mix;
        m.tools = args.extruders;
        m.mix_speed = args.speed;
        m.plot = args.plot;
    }
    args.files.apply_overrides(&mut cfg)?;

    let r = run_file(&args.files, &cfg)?;
    eprintln!(
        "mix ok: lines={} -> {} max_z={:.2}mm events={} inserted={} dropped={} settings={} out={}",
        r.lines_in,
        r.lines_out,
        r.max_height,
        r.events,
        r.inserted,
        r.dropped,
        r.settings_id,
        args.files.out_path()
    );
    Ok(())
}
