// crates/ztex-core/src/config/config.rs

/// What a hard `minTemp` clamp does with a pending postponed delta.
///
/// The ceiling always discards it (the owed heat can never be applied above
/// `maxTemp`). The floor is a policy choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarryPolicy {
    /// Drop the pending delta, symmetric with the ceiling.
    Discard,
    /// Keep the pending delta for the next qualifying sample.
    Keep,
}

/// Temperature-texture ("wood") parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct WoodParams {
    /// Inclusive lower bound of every emitted temperature (°C).
    pub min_temp: f64,
    /// Inclusive upper bound of every emitted temperature (°C).
    pub max_temp: f64,
    /// Temperature kept for the first 0.5mm; zero disables the override.
    pub first_temp: f64,
    /// Average band size (mm). Divides the noise domain coordinate.
    pub grain_size: f64,
    /// Exponent applied to the [0,1) noise; >1 makes dark bands sparser.
    pub spikiness_power: f64,
    /// Vertical shift of the noise domain (mm).
    pub z_offset: f64,
    /// Heights at or below this are never sampled (raft skip).
    pub skip_start_z: f64,
    /// Instant increase limit between two events; zero disables.
    pub max_upward: f64,
    /// Instant decrease limit between two events; zero disables.
    pub max_downward: f64,
    /// Firmware command used to set the temperature, e.g. `M104`.
    pub temp_command: String,
    pub floor_carry: CarryPolicy,
}

/// Multi-material mixing parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MixParams {
    /// Number of mixed materials (ratio channels).
    pub channels: usize,
    /// When non-zero, emit discrete `T<n>` tool selects instead of ratios.
    pub tools: usize,
    /// Rate of change along Z; bigger means thinner bands.
    pub mix_speed: f64,
    /// Append tab-separated plot records to the trailer.
    pub plot: bool,
}

impl MixParams {
    pub fn tool_mode(&self) -> bool {
        self.tools > 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Temperature(WoodParams),
    Ratio(MixParams),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Temperature(_) => "temperature",
            Mode::Ratio(_) => "ratio",
        }
    }
}

/// One invocation's configuration. Everything derived from it (permutation
/// table, per-channel phases, constraint state) lives for one run only.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Seed of the deterministic texture; reuse it to reproduce a run.
    pub seed: u64,
    /// Lines scanned ahead for a Z-hop (0 disables, capped at 5).
    pub scan_for_z_hop: usize,
    pub mode: Mode,
}

impl Config {
    pub fn wood(&self) -> Option<&WoodParams> {
        match &self.mode {
            Mode::Temperature(w) => Some(w),
            Mode::Ratio(_) => None,
        }
    }

    pub fn mix(&self) -> Option<&MixParams> {
        match &self.mode {
            Mode::Ratio(m) => Some(m),
            Mode::Temperature(_) => None,
        }
    }

    pub fn wood_mut(&mut self) -> Option<&mut WoodParams> {
        match &mut self.mode {
            Mode::Temperature(w) => Some(w),
            Mode::Ratio(_) => None,
        }
    }

    pub fn mix_mut(&mut self) -> Option<&mut MixParams> {
        match &mut self.mode {
            Mode::Ratio(m) => Some(m),
            Mode::Temperature(_) => None,
        }
    }
}
