// crates/ztex-core/src/field/samples.rs
//
// First pass: sample the field at every height the rewrite pass may commit.

use std::collections::HashMap;

use crate::field::mix_cycle::MixCycle;
use crate::field::wood::WoodField;
use crate::gcode::height::{self, HeightKey};

/// Heights closer than this to the last retained one are not sampled
/// (limits changes on spiral/continuous-Z slicing).
pub const MIN_CHANGE_Z: f64 = 0.1;

/// A height this far above the last retained one is taken as the new
/// reference without sampling (initial lift moves of some slicers).
pub const JUMP_Z: f64 = 2.0;

/// Field values indexed by exact height.
#[derive(Clone, Debug)]
pub struct HeightSamples<T> {
    map: HashMap<HeightKey, T>,
}

impl<T> Default for HeightSamples<T> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<T> HeightSamples<T> {
    pub fn insert(&mut self, z: f64, v: T) {
        self.map.insert(HeightKey::of(z), v);
    }

    pub fn get(&self, z: f64) -> Option<&T> {
        self.map.get(&HeightKey::of(z))
    }

    pub fn contains(&self, z: f64) -> bool {
        self.map.contains_key(&HeightKey::of(z))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.map.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.map.values_mut()
    }

    /// Sampled heights in ascending order.
    pub fn heights(&self) -> Vec<f64> {
        let mut zs: Vec<f64> = self.map.keys().map(|k| k.z()).collect();
        zs.sort_by(f64::total_cmp);
        zs
    }
}

/// Running min/max of raw field values.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeStats {
    pub min: f64,
    pub max: f64,
    pub saw_any: bool,
}

impl RangeStats {
    pub fn observe(&mut self, v: f64) {
        if !self.saw_any {
            self.saw_any = true;
            self.min = v;
            self.max = v;
        } else {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    /// Linear rescale into [0,1]. A flat range maps everything to 0.
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            ((v - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Sample the wood field over the document and normalize globally.
///
/// Height 0 is always present: some slicers never write an initial Z.
pub fn wood_samples<S: AsRef<str>>(
    lines: &[S],
    field: &WoodField,
    skip_start_z: f64,
) -> (HeightSamples<f64>, RangeStats) {
    let mut samples = HeightSamples::default();
    samples.insert(0.0, field.raw(0.0));

    let mut former = -1.0;
    for line in lines {
        let z = height::height_of(line.as_ref(), former);
        if z > JUMP_Z + former {
            former = z;
        } else if (z - former).abs() > MIN_CHANGE_Z && z > skip_start_z {
            former = z;
            samples.insert(z, field.raw(z));
        }
    }

    let mut stats = RangeStats::default();
    for &v in samples.values() {
        stats.observe(v);
    }
    for v in samples.values_mut() {
        *v = stats.normalize(*v);
    }
    (samples, stats)
}

/// Raw channel amplitudes at every distinct move height (plus height 0).
pub fn mix_samples<S: AsRef<str>>(lines: &[S], cycle: &MixCycle) -> HeightSamples<Vec<u32>> {
    let mut samples = HeightSamples::default();
    samples.insert(0.0, cycle.amplitudes(0.0));
    for line in lines {
        if let Some(z) = height::move_z(line.as_ref()) {
            if !samples.contains(z) {
                samples.insert(z, cycle.amplitudes(z));
            }
        }
    }
    samples
}
