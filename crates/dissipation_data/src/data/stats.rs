use super::mode::Mode;
use serde::{Deserialize, Serialize};

/// Per-tick output of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepStats {
    /// Heat generated this tick (`heat_diff + heat_act`).
    pub delta_heat: f64,
    /// Cumulative heat since reset.
    pub total_heat: f64,
    pub heat_diff: f64,
    pub heat_act: f64,
    pub agent_count: usize,
    /// Conservation residual; stays near zero for a correct tick.
    pub energy_error: f64,
}

/// One tick of the three-mode comparison. Every field is always populated;
/// a mode that has not run yet reports `StepStats::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub tick: u64,
    pub off: StepStats,
    pub random: StepStats,
    pub life: StepStats,
}

impl ComparisonRecord {
    #[must_use]
    pub fn stats(&self, mode: Mode) -> &StepStats {
        match mode {
            Mode::Off => &self.off,
            Mode::Random => &self.random,
            Mode::Life => &self.life,
        }
    }
}
