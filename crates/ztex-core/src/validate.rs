use crate::config::config::{Config, Mode};
use crate::config::defaults::{MAX_TOOLS, MAX_Z_HOP_SCAN};
use crate::error::{Result, ZtError};

/// Check a configuration and return the normalized copy the engine runs with.
///
/// Out-of-bound values that have an obvious nearest valid value are clamped
/// silently; only settings with no sane interpretation are rejected.
pub fn validate_config(cfg: &Config) -> Result<Config> {
    let mut c = cfg.clone();

    if c.scan_for_z_hop > MAX_Z_HOP_SCAN {
        c.scan_for_z_hop = MAX_Z_HOP_SCAN;
    }

    match &mut c.mode {
        Mode::Temperature(w) => {
            if !(w.grain_size > 0.0) || !w.grain_size.is_finite() {
                return Err(ZtError::Validation("grainSize must be > 0".into()));
            }
            if !w.min_temp.is_finite() || !w.max_temp.is_finite() {
                return Err(ZtError::Validation("temperatures must be finite".into()));
            }
            if w.min_temp > w.max_temp {
                return Err(ZtError::Validation("minTemp must be <= maxTemp".into()));
            }
            if w.temp_command.trim().is_empty() {
                return Err(ZtError::Validation("tempCommandName must not be empty".into()));
            }
            // Non-positive exponents would invert or flatten the bands.
            if !(w.spikiness_power > 0.0) {
                w.spikiness_power = 1.0;
            }
            if !(w.max_upward > 0.0) {
                w.max_upward = 0.0;
            }
            if !(w.max_downward > 0.0) {
                w.max_downward = 0.0;
            }
            if !(w.first_temp > 0.0) {
                w.first_temp = 0.0;
            } else {
                w.first_temp = w.first_temp.clamp(w.min_temp, w.max_temp);
            }
            w.temp_command = w.temp_command.trim().to_string();
        }
        Mode::Ratio(m) => {
            if m.tools > MAX_TOOLS {
                m.tools = MAX_TOOLS;
            }
            if m.channels == 0 && m.tools == 0 {
                return Err(ZtError::Validation(
                    "channelCount or toolCount must be non-zero".into(),
                ));
            }
            if !m.mix_speed.is_finite() {
                return Err(ZtError::Validation("mixSpeed must be finite".into()));
            }
        }
    }

    Ok(c)
}
