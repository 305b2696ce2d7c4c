// crates/ztex-core/src/constrain/temp.rs

use crate::config::config::{CarryPolicy, WoodParams};

#[derive(Clone, Copy, Debug)]
pub struct TempLimits {
    pub min: f64,
    pub max: f64,
    /// Zero disables the upward step limit.
    pub max_up: f64,
    /// Zero disables the downward step limit.
    pub max_down: f64,
    pub floor_carry: CarryPolicy,
}

impl From<&WoodParams> for TempLimits {
    fn from(p: &WoodParams) -> Self {
        Self {
            min: p.min_temp,
            max: p.max_temp,
            max_up: p.max_upward,
            max_down: p.max_downward,
            floor_carry: p.floor_carry,
        }
    }
}

/// Rate-limited, clamped temperature with carry-over.
///
/// A change larger than a step limit is cut at the limit and the remainder is
/// postponed to the next sample, so the owed change is eventually applied
/// unless a hard bound makes it impossible.
#[derive(Clone, Debug)]
pub struct TempConstraint {
    limits: TempLimits,
    postponed: f64,
    last_applied: Option<f64>,
}

impl TempConstraint {
    pub fn new(limits: TempLimits) -> Self {
        Self {
            limits,
            postponed: 0.0,
            last_applied: None,
        }
    }

    /// Reference for the next step limit, without any clamping.
    pub fn seed(&mut self, t: f64) {
        self.last_applied = Some(t);
    }

    pub fn postponed(&self) -> f64 {
        self.postponed
    }

    pub fn last_applied(&self) -> Option<f64> {
        self.last_applied
    }

    /// Temperature from a normalized field value in [0,1].
    pub fn target(&self, normalized: f64) -> f64 {
        self.limits.min + normalized * (self.limits.max - self.limits.min)
    }

    pub fn apply(&mut self, target: f64) -> f64 {
        let l = self.limits;
        let mut t = target + self.postponed;
        self.postponed = 0.0;

        if let Some(last) = self.last_applied {
            if l.max_up > 0.0 && t > last + l.max_up {
                self.postponed = t - (last + l.max_up);
                t = last + l.max_up;
            }
            if l.max_down > 0.0 && t < last - l.max_down {
                self.postponed = t - (last - l.max_down);
                t = last - l.max_down;
            }
        }

        if t > l.max {
            self.postponed = 0.0;
            t = l.max;
        }
        if t < l.min {
            match l.floor_carry {
                CarryPolicy::Discard => self.postponed = 0.0,
                CarryPolicy::Keep => self.postponed += t - l.min,
            }
            t = l.min;
        }

        self.last_applied = Some(t);
        t
    }
}
