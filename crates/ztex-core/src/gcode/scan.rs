// crates/ztex-core/src/gcode/scan.rs

/// First numeric value right after `key`, or `None`.
///
/// Only the first occurrence of `key` counts. The field is absent when that
/// occurrence sits after a `;` comment marker, or when no number (optional
/// sign, digits, at most one decimal point) follows it immediately.
pub fn field(line: &str, key: char) -> Option<f64> {
    let at = line.find(key)?;
    if let Some(c) = line.find(';') {
        if at > c {
            return None;
        }
    }
    number_prefix(&line[at + key.len_utf8()..])
}

/// `field` with a caller-supplied fallback.
pub fn field_or(line: &str, key: char, default: f64) -> f64 {
    field(line, key).unwrap_or(default)
}

fn number_prefix(s: &str) -> Option<f64> {
    let b = s.as_bytes();
    let mut i = 0usize;
    if i < b.len() && (b[i] == b'-' || b[i] == b'+') {
        i += 1;
    }
    let digits_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    s[..i].parse::<f64>().ok()
}

/// Numeric command field (`G`, `M`, `T`) as an integer, when it is whole.
pub fn command(line: &str, key: char) -> Option<i64> {
    let v = field(line, key)?;
    if v.fract() == 0.0 {
        Some(v as i64)
    } else {
        None
    }
}
