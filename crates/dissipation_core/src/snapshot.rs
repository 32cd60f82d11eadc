//! Read-only engine snapshots handed to renderers.

use crate::engine::EngineState;
use dissipation_data::{Agent, Mode};
use serde::{Deserialize, Serialize};

/// Read-only copy of one engine handed to renderers.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub tick: u64,
    pub grid_size: usize,
    pub cells: Vec<f64>,
    pub agents: Vec<Agent>,
}

impl EngineSnapshot {
    #[must_use]
    pub fn capture(state: &EngineState) -> Self {
        Self {
            mode: state.mode,
            tick: state.tick,
            grid_size: state.grid.size,
            cells: state.grid.cells.clone(),
            agents: state.agents.clone(),
        }
    }

    /// Per-cell colour intensities, row-major.
    #[must_use]
    pub fn intensities(&self) -> Vec<u8> {
        self.cells.iter().map(|&e| cell_intensity(e)).collect()
    }

    /// Fill colour for this snapshot's agents.
    #[must_use]
    pub fn agent_color(&self) -> (u8, u8, u8) {
        self.mode.color()
    }
}

/// `min(energy * 15, 255)` as a colour channel.
#[inline]
#[must_use]
pub fn cell_intensity(energy: f64) -> u8 {
    (energy * 15.0).clamp(0.0, 255.0) as u8
}
