// crates/ztex-core/src/config/keyed.rs
//
// Option-name access for hosts that hand settings over as key/value text
// (plugin dialogs, `--set key=value`).

use std::str::FromStr;

use crate::config::config::{CarryPolicy, Config, MixParams, Mode, WoodParams};
use crate::config::defaults::{default_mix, default_wood, MAX_Z_HOP_SCAN};
use crate::error::{Result, ZtError};

fn bad(key: &str, value: &str) -> ZtError {
    ZtError::BadValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| bad(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(bad(key, value)),
    }
}

impl FromStr for CarryPolicy {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discard" => Ok(CarryPolicy::Discard),
            "keep" => Ok(CarryPolicy::Keep),
            _ => Err(()),
        }
    }
}

impl Config {
    /// Set one option by name.
    ///
    /// `mode` swaps in the defaults of the chosen mode; mode-specific keys
    /// fail with `BadValue` when the other mode is active.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "randomSeed" => {
                self.seed = parse(key, value)?;
                return Ok(());
            }
            "scanForZHop" => {
                let n: i64 = parse(key, value)?;
                self.scan_for_z_hop = n.clamp(0, MAX_Z_HOP_SCAN as i64) as usize;
                return Ok(());
            }
            "mode" => {
                self.mode = match value.trim().to_ascii_lowercase().as_str() {
                    "temperature" | "wood" => Mode::Temperature(default_wood()),
                    "ratio" | "mix" => Mode::Ratio(default_mix()),
                    _ => return Err(bad(key, value)),
                };
                return Ok(());
            }
            _ => {}
        }

        match &mut self.mode {
            Mode::Temperature(w) => set_wood(w, key, value),
            Mode::Ratio(m) => set_mix(m, key, value),
        }
    }

    /// Parse `key=value` and apply it.
    pub fn set_pair(&mut self, pair: &str) -> Result<()> {
        let (k, v) = pair.split_once('=').ok_or_else(|| bad("pair", pair))?;
        self.set(k.trim(), v)
    }
}

fn set_wood(w: &mut WoodParams, key: &str, value: &str) -> Result<()> {
    match key {
        "minTemp" => w.min_temp = parse(key, value)?,
        "maxTemp" => w.max_temp = parse(key, value)?,
        "firstTemp" => w.first_temp = parse(key, value)?,
        "grainSize" => w.grain_size = parse(key, value)?,
        "spikinessPower" => w.spikiness_power = parse(key, value)?,
        "zOffset" => w.z_offset = parse(key, value)?,
        "skipStartZ" => w.skip_start_z = parse(key, value)?,
        "maxUpwardStep" => w.max_upward = parse(key, value)?,
        "maxDownwardStep" => w.max_downward = parse(key, value)?,
        "tempCommandName" => w.temp_command = value.trim().to_string(),
        "floorCarry" => w.floor_carry = parse(key, value)?,
        "channelCount" | "toolCount" | "mixSpeed" | "plotData" => return Err(bad(key, value)),
        _ => return Err(ZtError::UnknownOption(key.to_string())),
    }
    Ok(())
}

fn set_mix(m: &mut MixParams, key: &str, value: &str) -> Result<()> {
    match key {
        "channelCount" => m.channels = parse(key, value)?,
        "toolCount" => m.tools = parse(key, value)?,
        "mixSpeed" => m.mix_speed = parse(key, value)?,
        "plotData" => m.plot = parse_bool(key, value)?,
        "minTemp" | "maxTemp" | "firstTemp" | "grainSize" | "spikinessPower" | "zOffset"
        | "skipStartZ" | "maxUpwardStep" | "maxDownwardStep" | "tempCommandName" | "floorCarry" => {
            return Err(bad(key, value))
        }
        _ => return Err(ZtError::UnknownOption(key.to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::{default_ratio_config, default_temperature_config};

    #[test]
    fn sets_wood_options_by_name() {
        let mut c = default_temperature_config();
        c.set("minTemp", "200").unwrap();
        c.set_pair("tempCommandName= M109").unwrap();
        c.set("floorCarry", "keep").unwrap();
        c.set("randomSeed", "42").unwrap();

        let w = c.wood().unwrap();
        assert_eq!(w.min_temp, 200.0);
        assert_eq!(w.temp_command, "M109");
        assert_eq!(w.floor_carry, CarryPolicy::Keep);
        assert_eq!(c.seed, 42);
    }

    #[test]
    fn scan_window_is_clamped_not_rejected() {
        let mut c = default_temperature_config();
        c.set("scanForZHop", "-1").unwrap();
        assert_eq!(c.scan_for_z_hop, 0);
        c.set("scanForZHop", "9").unwrap();
        assert_eq!(c.scan_for_z_hop, 5);
        c.set("scanForZHop", "3").unwrap();
        assert_eq!(c.scan_for_z_hop, 3);
        assert!(c.set("scanForZHop", "two").is_err());
    }

    #[test]
    fn rejects_keys_of_the_other_mode() {
        let mut c = default_ratio_config();
        assert!(matches!(c.set("minTemp", "200"), Err(ZtError::BadValue { .. })));
        assert!(matches!(c.set("bogus", "1"), Err(ZtError::UnknownOption(_))));
        assert!(c.set("mixSpeed", "fast").is_err());
    }

    #[test]
    fn mode_switch_resets_params() {
        let mut c = default_ratio_config();
        c.set("channelCount", "4").unwrap();
        c.set("mode", "temperature").unwrap();
        assert_eq!(c.wood().unwrap().max_temp, 240.0);
        c.set("mode", "ratio").unwrap();
        assert_eq!(c.mix().unwrap().channels, 3);
    }
}
