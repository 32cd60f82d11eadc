use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase-diagram category of one sweep point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepStatus {
    /// An average came out non-finite.
    Invalid,
    /// Life population averaged below one agent.
    Dead,
    /// Life dissipated less heat than the empty substrate.
    Suppressor,
    /// Life dissipated at least as much heat as the empty substrate.
    Accelerator,
}

impl SweepStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SweepStatus::Invalid => "invalid",
            SweepStatus::Dead => "dead",
            SweepStatus::Suppressor => "suppressor",
            SweepStatus::Accelerator => "accelerator",
        }
    }
}

impl fmt::Display for SweepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finalised statistics for one `(inflow, consumption)` point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub inflow: f64,
    pub consumption: f64,
    pub avg_off_delta: f64,
    pub avg_life_delta: f64,
    /// `avg_life_delta / avg_off_delta`, with `1e-9` standing in for a zero denominator.
    pub ratio: f64,
    pub avg_life_heat_diff: f64,
    pub avg_life_heat_act: f64,
    pub avg_agents_life: f64,
    pub avg_agents_random: f64,
    pub error_min: f64,
    pub error_max: f64,
    pub status: SweepStatus,
}
