// crates/ztex-core/src/config/defaults.rs

use crate::config::config::{CarryPolicy, Config, MixParams, Mode, WoodParams};

/// Lookahead used when the caller does not say otherwise; also the hard cap.
pub const MAX_Z_HOP_SCAN: usize = 5;

/// Highest tool index range supported by discrete-tool mode.
pub const MAX_TOOLS: usize = 15;

pub fn default_wood() -> WoodParams {
    WoodParams {
        min_temp: 190.0,
        max_temp: 240.0,
        first_temp: 0.0,
        grain_size: 3.0,
        spikiness_power: 1.0,
        z_offset: 0.0,
        skip_start_z: 0.0,
        max_upward: 0.0,
        max_downward: 0.0,
        temp_command: "M104".to_string(),
        floor_carry: CarryPolicy::Discard,
    }
}

pub fn default_mix() -> MixParams {
    MixParams {
        channels: 3,
        tools: 0,
        mix_speed: 1.0,
        plot: false,
    }
}

pub fn default_temperature_config() -> Config {
    Config {
        seed: 0,
        scan_for_z_hop: MAX_Z_HOP_SCAN,
        mode: Mode::Temperature(default_wood()),
    }
}

pub fn default_ratio_config() -> Config {
    // Seed 2 is the texture the mixing tool always shipped with.
    Config {
        seed: 2,
        scan_for_z_hop: MAX_Z_HOP_SCAN,
        mode: Mode::Ratio(default_mix()),
    }
}
