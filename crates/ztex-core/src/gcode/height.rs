// crates/ztex-core/src/gcode/height.rs

use crate::gcode::scan;

/// Linear move (`G0` or `G1`).
pub fn is_move(line: &str) -> bool {
    matches!(scan::command(line, 'G'), Some(0) | Some(1))
}

/// Z declared by a move line, if any.
pub fn move_z(line: &str) -> Option<f64> {
    if is_move(line) {
        scan::field(line, 'Z')
    } else {
        None
    }
}

/// Height of `line`, or `fallback` when the line is not a move carrying Z.
pub fn height_of(line: &str, fallback: f64) -> f64 {
    move_z(line).unwrap_or(fallback)
}

/// Highest Z ever reached by a move line (0 when none declares Z).
pub fn max_height<S: AsRef<str>>(lines: &[S]) -> f64 {
    lines
        .iter()
        .filter_map(|l| move_z(l.as_ref()))
        .fold(0.0, f64::max)
}

/// Exact-match key for heights parsed from text.
///
/// The same textual height always parses to the same bits, which is what the
/// sample index relies on. `-0.0` is folded into `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeightKey(u64);

impl HeightKey {
    pub fn of(z: f64) -> Self {
        let z = if z == 0.0 { 0.0 } else { z };
        HeightKey(z.to_bits())
    }

    pub fn z(self) -> f64 {
        f64::from_bits(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_moves_declare_height() {
        assert_eq!(height_of("G1 Z0.2 E1", -1.0), 0.2);
        assert_eq!(height_of("G0 Z3", -1.0), 3.0);
        assert_eq!(height_of("G92 Z10", 1.5), 1.5);
        assert_eq!(height_of("M104 S200", 1.5), 1.5);
        assert_eq!(height_of("G1 X4 Y5", 1.5), 1.5);
    }

    #[test]
    fn max_height_ignores_non_moves() {
        let lines = ["G1 Z0.2", "G92 Z99", "G1 Z5.4", "G0 Z3", "; G1 Z80"];
        assert_eq!(max_height(&lines), 5.4);
        assert_eq!(max_height::<&str>(&[]), 0.0);
    }

    #[test]
    fn negative_zero_shares_key() {
        assert_eq!(HeightKey::of(-0.0), HeightKey::of(0.0));
        assert_eq!(HeightKey::of(1.25).z(), 1.25);
    }
}
