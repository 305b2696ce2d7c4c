// crates/ztex-core/src/config/fingerprint.rs

use crate::config::config::{Config, Mode};

/// Canonical one-line rendering of every option that affects the output.
pub fn canonical(cfg: &Config) -> String {
    let mut s = format!("seed={};scan={};mode={}", cfg.seed, cfg.scan_for_z_hop, cfg.mode.name());
    match &cfg.mode {
        Mode::Temperature(w) => {
            s.push_str(&format!(
                ";min={};max={};first={};grain={};spike={};zoff={};skip={};up={};down={};cmd={};floor={:?}",
                w.min_temp,
                w.max_temp,
                w.first_temp,
                w.grain_size,
                w.spikiness_power,
                w.z_offset,
                w.skip_start_z,
                w.max_upward,
                w.max_downward,
                w.temp_command,
                w.floor_carry
            ));
        }
        Mode::Ratio(m) => {
            s.push_str(&format!(
                ";channels={};tools={};speed={};plot={}",
                m.channels, m.tools, m.mix_speed, m.plot
            ));
        }
    }
    s
}

pub fn blake3_16(bytes: &[u8]) -> [u8; 16] {
    let hash = blake3::hash(bytes);
    let mut out = [0u8; 16];
    out.copy_from_slice(&hash.as_bytes()[0..16]);
    out
}

/// Short hex id of a configuration; equal ids mean identical settings.
pub fn settings_id_hex(cfg: &Config) -> String {
    blake3_16(canonical(cfg).as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
