// crates/ztex-core/src/rewrite/wood.rs

use crate::config::config::WoodParams;
use crate::constrain::temp::{TempConstraint, TempLimits};
use crate::field::samples::HeightSamples;
use crate::gcode::markers::{tagged, tagged_comment, StaleCommands};
use crate::rewrite::diag;
use crate::rewrite::{Modulator, RunInfo};

/// `firstTemp` holds up to this height (mm).
pub const FIRST_LAYER_Z: f64 = 0.5;

/// Temperature texture: noise samples through the rate limiter into heater
/// commands.
pub struct WoodModulator<'a> {
    params: &'a WoodParams,
    samples: &'a HeightSamples<f64>,
    info: RunInfo,
    z_hop_window: usize,
    constraint: TempConstraint,
    /// Warm-up temperature and block, until replayed.
    warm_up: Option<(f64, Vec<String>)>,
    last_emitted: Option<i64>,
    /// Set by the first event above `FIRST_LAYER_Z`; ends the override.
    left_first_layer: bool,
    rows: Vec<String>,
}

impl<'a> WoodModulator<'a> {
    pub fn new(
        params: &'a WoodParams,
        samples: &'a HeightSamples<f64>,
        info: RunInfo,
        z_hop_window: usize,
    ) -> Self {
        Self {
            params,
            samples,
            info,
            z_hop_window,
            constraint: TempConstraint::new(TempLimits::from(params)),
            warm_up: None,
            last_emitted: None,
            left_first_layer: false,
            rows: Vec::new(),
        }
    }

    fn set_temp(&self, t: i64) -> String {
        tagged(&format!("{} S{}", self.params.temp_command, t))
    }

    /// Starting temperature: `firstTemp` when set, else the height-0 sample.
    pub fn warm_up_temp(&self) -> f64 {
        if self.params.first_temp != 0.0 {
            self.params.first_temp
        } else {
            self.constraint
                .target(self.samples.get(0.0).copied().unwrap_or(0.0))
        }
    }

    fn graph_title(&self) -> String {
        let p = self.params;
        let mut s = format!(
            "Wood temperature graph (from {}C to {}C, grain size {}mm, z-offset {}, scanForZHop {})",
            p.min_temp, p.max_temp, p.grain_size, p.z_offset, self.z_hop_window
        );
        if p.skip_start_z != 0.0 {
            s.push_str(&format!(", skipped first {}mm of print", p.skip_start_z));
        }
        if p.max_upward != 0.0 {
            s.push_str(&format!(", temperature increases capped at {}", p.max_upward));
        }
        if p.max_downward != 0.0 {
            s.push_str(&format!(", temperature decreases capped at {}", p.max_downward));
        }
        s.push(':');
        diag::graph_line(&s)
    }
}

impl Modulator for WoodModulator<'_> {
    fn superseded(&self) -> StaleCommands {
        StaleCommands::Temperature
    }

    fn sampled(&self, z: f64) -> bool {
        self.samples.contains(z)
    }

    fn header(&mut self) -> Vec<String> {
        let t0 = self.warm_up_temp();
        self.constraint.seed(t0);
        self.last_emitted = Some(t0 as i64);

        // Wait-for-temperature is switched on for the first setting only.
        let block = vec![
            tagged("M230 S0"),
            self.set_temp(t0 as i64),
            tagged("M230 S1"),
            tagged("M116"),
        ];
        self.warm_up = Some((t0, block.clone()));

        let mut out = vec![tagged_comment(&format!(
            "woodified gcode, see graph at the end, {}",
            self.info.suffix()
        ))];
        out.extend(block);
        out
    }

    fn replay_after_tool_change(&mut self) -> Vec<String> {
        let Some((t0, block)) = self.warm_up.take() else {
            return Vec::new();
        };
        // The heater is back at the warm-up temperature after the replay.
        self.constraint.seed(t0);
        self.last_emitted = Some(t0 as i64);
        block
    }

    fn commit(&mut self, z: f64) -> Vec<String> {
        let p = self.params;
        if z > FIRST_LAYER_Z {
            self.left_first_layer = true;
        }
        let temp = if p.first_temp != 0.0 && !self.left_first_layer {
            self.constraint.seed(p.first_temp);
            p.first_temp
        } else {
            let n = self.samples.get(z).copied().unwrap_or(0.0);
            let target = self.constraint.target(n);
            self.constraint.apply(target)
        };
        self.rows.push(diag::temp_row(z, temp, p.min_temp, p.max_temp));

        let t = temp as i64;
        if self.last_emitted == Some(t) {
            return Vec::new();
        }
        self.last_emitted = Some(t);
        vec![self.set_temp(t)]
    }

    fn trailer(&mut self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.graph_title());
        out.append(&mut self.rows);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::default_wood;

    fn samples(pairs: &[(f64, f64)]) -> HeightSamples<f64> {
        let mut s = HeightSamples::default();
        for &(z, v) in pairs {
            s.insert(z, v);
        }
        s
    }

    #[test]
    fn header_brackets_first_setting() {
        let p = default_wood();
        let s = samples(&[(0.0, 0.5)]);
        let mut m = WoodModulator::new(&p, &s, RunInfo::default(), 5);
        let h = m.header();
        assert_eq!(h.len(), 5);
        assert!(h[0].starts_with(";ztex woodified gcode"));
        assert_eq!(h[1], "M230 S0 ;ztex");
        assert_eq!(h[2], "M104 S215 ;ztex");
        assert_eq!(h[3], "M230 S1 ;ztex");
        assert_eq!(h[4], "M116 ;ztex");
        assert_eq!(m.replay_after_tool_change(), h[1..].to_vec());
        assert!(m.replay_after_tool_change().is_empty());
    }

    #[test]
    fn unchanged_integer_temperature_is_not_repeated() {
        let p = default_wood();
        let s = samples(&[(0.0, 0.5), (1.0, 0.5), (2.0, 1.0)]);
        let mut m = WoodModulator::new(&p, &s, RunInfo::default(), 5);
        m.header();
        assert!(m.commit(1.0).is_empty());
        assert_eq!(m.commit(2.0), vec!["M104 S240 ;ztex".to_string()]);
        let trailer = m.trailer();
        assert_eq!(trailer.len(), 3);
        assert!(trailer[0].contains("from 190C to 240C"));
    }

    #[test]
    fn first_layer_override() {
        let mut p = default_wood();
        p.first_temp = 205.0;
        p.max_upward = 5.0;
        let s = samples(&[(0.0, 0.0), (0.3, 1.0), (0.6, 1.0)]);
        let mut m = WoodModulator::new(&p, &s, RunInfo::default(), 5);
        let h = m.header();
        assert_eq!(h[2], "M104 S205 ;ztex");
        assert!(m.commit(0.3).is_empty());
        // Rate limit starts from the first-layer temperature.
        assert_eq!(m.commit(0.6), vec!["M104 S210 ;ztex".to_string()]);
    }

    #[test]
    fn low_event_after_first_layer_goes_through_the_limiter() {
        let mut p = default_wood();
        p.first_temp = 205.0;
        p.max_upward = 5.0;
        let s = samples(&[(0.0, 0.0), (0.3, 0.0), (1.0, 1.0), (0.4, 1.0)]);
        let mut m = WoodModulator::new(&p, &s, RunInfo::default(), 5);
        m.header();
        assert!(m.commit(0.3).is_empty());
        assert_eq!(m.commit(1.0), vec!["M104 S210 ;ztex".to_string()]);
        // Back under 0.5mm: no silent reset to 205, the ramp continues.
        assert_eq!(m.commit(0.4), vec!["M104 S215 ;ztex".to_string()]);
    }

    #[test]
    fn replay_restarts_rate_limit_from_warm_up() {
        let mut p = default_wood();
        p.max_upward = 5.0;
        let s = samples(&[(0.0, 0.0), (1.0, 1.0), (2.0, 1.0)]);
        let mut m = WoodModulator::new(&p, &s, RunInfo::default(), 5);
        m.header();
        assert_eq!(m.commit(1.0), vec!["M104 S195 ;ztex".to_string()]);
        assert_eq!(m.replay_after_tool_change()[1], "M104 S190 ;ztex");
        assert_eq!(m.commit(2.0), vec!["M104 S195 ;ztex".to_string()]);
    }

    #[test]
    fn custom_command_name() {
        let mut p = default_wood();
        p.temp_command = "M109".into();
        let s = samples(&[(0.0, 0.0), (1.0, 1.0)]);
        let mut m = WoodModulator::new(&p, &s, RunInfo::default(), 0);
        assert_eq!(m.header()[2], "M109 S190 ;ztex");
        assert_eq!(m.commit(1.0), vec!["M109 S240 ;ztex".to_string()]);
    }
}
