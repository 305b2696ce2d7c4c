// crates/ztex-core/src/constrain/ratio.rs

/// Integer percentages summing to exactly 100, or `None` for an all-zero input.
///
/// Every channel but the last is rounded from its share; the last channel
/// takes what is left. A rounded share never exceeds what is left, so no
/// channel goes negative when two halves both round up.
pub fn percentages(amplitudes: &[u32]) -> Option<Vec<u32>> {
    let total: u64 = amplitudes.iter().map(|&a| a as u64).sum();
    if total == 0 {
        return None;
    }
    let n = amplitudes.len();
    let mut out = Vec::with_capacity(n);
    let mut fix: u32 = 0;
    for (i, &a) in amplitudes.iter().enumerate() {
        let pc = if i + 1 < n {
            let share = (100.0 * a as f64 / total as f64).round() as u32;
            share.min(100 - fix)
        } else {
            100 - fix
        };
        fix += pc;
        out.push(pc);
    }
    Some(out)
}

/// Last emitted percentage per channel.
#[derive(Clone, Debug)]
pub struct RatioState {
    last: Vec<Option<u32>>,
}

impl RatioState {
    pub fn new(channels: usize) -> Self {
        Self {
            last: vec![None; channels],
        }
    }

    /// Record `pcs` and return the `(channel, percentage)` pairs that changed.
    pub fn update(&mut self, pcs: &[u32]) -> Vec<(usize, u32)> {
        let mut changed = Vec::new();
        for (i, (&pc, last)) in pcs.iter().zip(self.last.iter_mut()).enumerate() {
            if *last != Some(pc) {
                *last = Some(pc);
                changed.push((i, pc));
            }
        }
        changed
    }

    pub fn last(&self) -> &[Option<u32>] {
        &self.last
    }
}
