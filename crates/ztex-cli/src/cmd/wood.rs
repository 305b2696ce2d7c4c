// crates/ztex-cli/src/cmd/wood.rs

use clap::{Args, ValueEnum};
use ztex_core::config::defaults::default_temperature_config;
use ztex_core::CarryPolicy;

use crate::cmd::common::{run_file, FileArgs};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum FloorCarry {
    /// Forget the shortfall when the temperature is raised to the floor.
    Discard,
    /// Keep owing the shortfall to later layers.
    Keep,
}

impl From<FloorCarry> for CarryPolicy {
    fn from(f: FloorCarry) -> Self {
        match f {
            FloorCarry::Discard => CarryPolicy::Discard,
            FloorCarry::Keep => CarryPolicy::Keep,
        }
    }
}

#[derive(Args)]
pub struct WoodArgs {
    #[command(flatten)]
    pub files: FileArgs,

    /// Lowest temperature (C)
    #[arg(long, default_value_t = 190.0)]
    pub min: f64,

    /// Highest temperature (C)
    #[arg(long, default_value_t = 240.0)]
    pub max: f64,

    /// Temperature held up to 0.5mm; 0 uses the texture from the start
    #[arg(long, default_value_t = 0.0)]
    pub first_temp: f64,

    /// Average grain thickness (mm)
    #[arg(long, default_value_t = 3.0)]
    pub grain: f64,

    /// Largest temperature increase per change; 0 is unlimited
    #[arg(long, default_value_t = 0.0)]
    pub max_upward: f64,

    /// Largest temperature decrease per change; 0 is unlimited
    #[arg(long, default_value_t = 0.0)]
    pub max_downward: f64,

    #[arg(long, default_value_t = 0)]
    pub random_seed: u64,

    /// Exponent applied to the noise; higher makes dark rings rarer
    #[arg(long, default_value_t = 1.0)]
    pub spikiness_power: f64,

    /// Shift of the texture along Z (mm)
    #[arg(long, default_value_t = 0.0)]
    pub z_offset: f64,

    /// No temperature changes below this height (mm)
    #[arg(long, default_value_t = 0.0)]
    pub skip_start_z: f64,

    /// Heater command, e.g. M109 for firmwares that want to wait
    #[arg(long, default_value = "M104")]
    pub temp_command: String,

    #[arg(long, value_enum, default_value_t = FloorCarry::Discard)]
    pub floor_carry: FloorCarry,
}

pub fn run(args: WoodArgs) -> anyhow::Result<()> {
    let mut cfg = default_temperature_config();
    cfg.seed = args.random_seed;
    if let Some(w) = cfg.wood_mut() {
        w.min_temp = args.min;
        w.max_temp = args.max;
        w.first_temp = args.first_temp;
        w.grain_size = args.grain;
        w.max_upward = args.max_upward;
        w.max_downward = args.max_downward;
        w.spikiness_power = args.spikiness_power;
        w.z_offset = args.z_offset;
        w.skip_start_z = args.skip_start_z;
        w.temp_command = args.temp_command.clone();
        w.floor_carry = args.floor_carry.into();
    }
    args.files.apply_overrides(&mut cfg)?;

    let r = run_file(&args.files, &cfg)?;
    eprintln!(
        "wood ok: lines={} -> {} max_z={:.2}mm samples={} events={} settings={} out={}",
        r.lines_in,
        r.lines_out,
        r.max_height,
        r.samples,
        r.events,
        r.settings_id,
        args.files.out_path()
    );
    Ok(())
}
