// crates/ztex-core/src/field/mix_cycle.rs

use std::f64::consts::PI;

use crate::field::rng::SeededRng;

/// Per-channel cosine cycles with seeded speed and phase.
#[derive(Clone, Debug)]
pub struct MixCycle {
    speeds: Vec<f64>,
    phases_deg: Vec<f64>,
    mix_speed: f64,
}

/// `floor(100 * (1 + cos(2π·n·speed + phase)) / 2)`, in 0..=100.
pub fn cycle_amplitude(normalized: f64, speed: f64, phase_deg: f64) -> u32 {
    let angle = 2.0 * PI * normalized;
    let offset = 2.0 * PI * phase_deg / 360.0;
    let amplitude = (1.0 + (angle * speed + offset).cos()) / 2.0;
    (100.0 * amplitude).floor().clamp(0.0, 100.0) as u32
}

impl MixCycle {
    /// Speeds are drawn first (all channels), then phases, from one stream.
    pub fn new(channels: usize, mix_speed: f64, rng: &mut SeededRng) -> Self {
        let speeds = (0..channels)
            .map(|_| 0.5 + rng.below(101) as f64 / 100.0)
            .collect();
        let phases_deg = (0..channels)
            .map(|_| 360.0 * rng.below(100) as f64 / 100.0)
            .collect();
        Self {
            speeds,
            phases_deg,
            mix_speed,
        }
    }

    pub fn from_seed(channels: usize, mix_speed: f64, seed: u64) -> Self {
        Self::new(channels, mix_speed, &mut SeededRng::new(seed))
    }

    pub fn channels(&self) -> usize {
        self.speeds.len()
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    pub fn phases_deg(&self) -> &[f64] {
        &self.phases_deg
    }

    /// Raw per-channel amplitudes at height `z`.
    ///
    /// Z is not divided by the object height: band thickness depends on
    /// `mix_speed` only, never on the geometry.
    pub fn amplitudes(&self, z: f64) -> Vec<u32> {
        let normalized = z * self.mix_speed / 20.0;
        self.speeds
            .iter()
            .zip(&self.phases_deg)
            .map(|(&s, &p)| cycle_amplitude(normalized, s, p))
            .collect()
    }
}
