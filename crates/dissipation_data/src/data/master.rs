use super::agent::Agent;
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// Canonical initial grid and population shared by all three mode engines.
///
/// Engines always receive clones of this value, never a reference, so one
/// engine's mutations can never leak into another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize)]
#[archive(check_bytes)]
pub struct MasterState {
    pub seed: u64,
    pub grid_size: usize,
    /// Row-major cell energies, `grid_size * grid_size` long.
    pub cells: Vec<f64>,
    pub agents: Vec<Agent>,
}

impl MasterState {
    /// Grid energy plus agent energy.
    #[must_use]
    pub fn total_energy(&self) -> f64 {
        self.cells.iter().sum::<f64>() + self.agents.iter().map(|a| a.energy).sum::<f64>()
    }
}
