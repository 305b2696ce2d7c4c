// crates/ztex-core/src/rewrite/diag.rs
//
// Trailer rows. All of them are comments, so firmware ignores them.

use crate::gcode::markers::{GRAPH_PREFIX, PLOT_PREFIX};

pub const BAR_WIDTH: usize = 20;

/// `#` for the fraction of `[min, max]` reached, `.` for the rest.
pub fn bar(value: f64, min: f64, max: f64, width: usize) -> String {
    let span = max - min;
    let filled = if span > 0.0 {
        let f = ((width - 1) as f64 * (value - min) / span).floor();
        f.clamp(0.0, (width - 1) as f64) as usize
    } else {
        0
    };
    let mut s = "#".repeat(filled);
    s.push_str(&".".repeat(width - filled));
    s
}

pub fn graph_line(text: &str) -> String {
    format!("{GRAPH_PREFIX} {text}")
}

pub fn temp_row(z: f64, temp: f64, min: f64, max: f64) -> String {
    graph_line(&format!(
        "Z {:.3} @{:>3}C | {}",
        z,
        temp as i64,
        bar(temp, min, max, BAR_WIDTH)
    ))
}

pub fn mix_row(z: f64, pcs: &[u32]) -> String {
    let cells: Vec<String> = pcs
        .iter()
        .map(|&p| format!("{:>3}% {}", p, bar(p as f64, 0.0, 100.0, 10)))
        .collect();
    graph_line(&format!("Z {:.3} | {}", z, cells.join(" | ")))
}

pub fn tool_row(z: f64, tool: usize, tools: usize) -> String {
    let top = tools.saturating_sub(1) as f64;
    graph_line(&format!(
        "Z {:.3} T{:<2} | {}",
        z,
        tool,
        bar(tool as f64, 0.0, top, BAR_WIDTH)
    ))
}

/// Tab-separated record for external plotting.
pub fn plot_row(z: f64, pcs: &[u32]) -> String {
    let mut s = format!("{PLOT_PREFIX}\t{z}");
    for p in pcs {
        s.push('\t');
        s.push_str(&p.to_string());
    }
    s
}
