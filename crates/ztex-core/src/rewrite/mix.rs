// crates/ztex-core/src/rewrite/mix.rs

use crate::config::config::MixParams;
use crate::constrain::ratio::{percentages, RatioState};
use crate::field::samples::HeightSamples;
use crate::gcode::markers::{tagged, tagged_comment, StaleCommands};
use crate::rewrite::diag;
use crate::rewrite::{Modulator, RunInfo};

/// Material mixing: cosine amplitudes into ratio commands, or a discrete
/// tool index when tools are configured.
pub struct MixModulator<'a> {
    params: &'a MixParams,
    samples: &'a HeightSamples<Vec<u32>>,
    max_z: f64,
    info: RunInfo,
    state: RatioState,
    last_tool: Option<usize>,
    rows: Vec<String>,
    plot: Vec<String>,
}

impl<'a> MixModulator<'a> {
    pub fn new(
        params: &'a MixParams,
        samples: &'a HeightSamples<Vec<u32>>,
        max_z: f64,
        info: RunInfo,
    ) -> Self {
        Self {
            params,
            samples,
            max_z,
            info,
            state: RatioState::new(params.channels),
            last_tool: None,
            rows: Vec::new(),
            plot: Vec::new(),
        }
    }

    /// `floor(tools * z / maxHeight)`, kept inside the configured tools.
    pub fn tool_at(&self, z: f64) -> usize {
        let tools = self.params.tools;
        if tools == 0 || self.max_z <= 0.0 {
            return 0;
        }
        let t = (tools as f64 * z / self.max_z).floor().max(0.0) as usize;
        t.min(tools - 1)
    }

    fn commit_tool(&mut self, z: f64) -> Vec<String> {
        let tool = self.tool_at(z);
        self.rows.push(diag::tool_row(z, tool, self.params.tools));
        if self.last_tool == Some(tool) {
            return Vec::new();
        }
        self.last_tool = Some(tool);
        vec![tagged(&format!("T{tool}"))]
    }

    fn commit_ratio(&mut self, z: f64) -> Vec<String> {
        let Some(amps) = self.samples.get(z) else {
            return Vec::new();
        };
        // All-zero amplitudes: keep the previous ratios in force.
        let Some(pcs) = percentages(amps) else {
            return Vec::new();
        };

        let changed = self.state.update(&pcs);
        let mut out: Vec<String> = changed
            .iter()
            .map(|&(i, pc)| tagged(&format!("M163 S{i} {pc}")))
            .collect();
        if !out.is_empty() {
            // Store the weights into virtual tool 0.
            out.push(tagged("M164 S0"));
        }

        self.rows.push(diag::mix_row(z, &pcs));
        if self.params.plot {
            self.plot.push(diag::plot_row(z, &pcs));
        }
        out
    }
}

impl Modulator for MixModulator<'_> {
    fn superseded(&self) -> StaleCommands {
        if self.params.tool_mode() {
            StaleCommands::Tools
        } else {
            StaleCommands::Ratio
        }
    }

    fn sampled(&self, z: f64) -> bool {
        self.samples.contains(z)
    }

    fn header(&mut self) -> Vec<String> {
        let p = self.params;
        let what = if p.tool_mode() {
            format!(
                "switching among {} tools, every {:.2}mm",
                p.tools,
                self.max_z / p.tools as f64
            )
        } else {
            format!("mixing {} materials along Z axis", p.channels)
        };
        vec![tagged_comment(&format!(
            "mixing: {} (total height is {:.2}mm), {}",
            what,
            self.max_z,
            self.info.suffix()
        ))]
    }

    fn commit(&mut self, z: f64) -> Vec<String> {
        if self.params.tool_mode() {
            self.commit_tool(z)
        } else {
            self.commit_ratio(z)
        }
    }

    fn trailer(&mut self) -> Vec<String> {
        let p = self.params;
        let title = if p.tool_mode() {
            format!("Tool graph ({} tools):", p.tools)
        } else {
            format!("Mix graph ({} channels, mix speed {}):", p.channels, p.mix_speed)
        };
        let mut out = Vec::with_capacity(self.rows.len() + self.plot.len() + 1);
        out.push(diag::graph_line(&title));
        out.append(&mut self.rows);
        out.append(&mut self.plot);
        out
    }
}
