// crates/ztex-core/src/field/wood.rs

use crate::config::config::WoodParams;
use crate::field::perlin::Perlin;
use crate::field::rng::SeededRng;

/// Band multiplier applied before folding into [0,1).
const BANDING: f64 = 3.0;
const OCTAVES: u32 = 2;
const PERSISTENCE: f64 = 0.7;

/// Height -> raw wood value in [0,1), before document-wide normalization.
#[derive(Clone, Debug)]
pub struct WoodField {
    perlin: Perlin,
    grain_size: f64,
    z_offset: f64,
    spikiness: f64,
}

impl WoodField {
    pub fn new(seed: u64, p: &WoodParams) -> Self {
        Self {
            perlin: Perlin::new(&mut SeededRng::new(seed)),
            grain_size: p.grain_size,
            z_offset: p.z_offset,
            spikiness: p.spikiness_power,
        }
    }

    pub fn raw(&self, z: f64) -> f64 {
        let coord = (z + self.z_offset) / (self.grain_size * 2.0);
        let n = BANDING * self.perlin.fractal(OCTAVES, PERSISTENCE, 0.0, 0.0, coord);
        let mut folded = n - n.floor();
        // Tiny negative sums round up to exactly 1.0.
        if folded >= 1.0 {
            folded = 0.0;
        }
        folded.powf(self.spikiness)
    }
}
