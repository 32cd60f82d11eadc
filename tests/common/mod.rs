pub mod macros;

use dissipation_core::comparison::Comparison;
use dissipation_core::config::EngineConfig;
use dissipation_core::engine::SimulationEngine;
use dissipation_core::master;
use dissipation_data::{Agent, MasterState, Mode};

/// Builds engines and comparisons from a tweaked default config.
#[allow(dead_code)]
pub struct EngineBuilder {
    config: EngineConfig,
    agents: Option<Vec<Agent>>,
    cells: Option<Vec<f64>>,
}

#[allow(dead_code)]
impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            agents: None,
            cells: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_grid(mut self, size: usize) -> Self {
        self.config.grid_size = size;
        self
    }

    pub fn with_rates(mut self, inflow: f64, consumption: f64) -> Self {
        self.config = self.config.with_rates(inflow, consumption);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut EngineConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Replaces the generated agents.
    pub fn with_agents(mut self, agents: Vec<Agent>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Replaces the generated grid with a uniform fill.
    pub fn with_uniform_grid(mut self, value: f64) -> Self {
        let n = self.config.grid_size * self.config.grid_size;
        self.cells = Some(vec![value; n]);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn master(&self) -> MasterState {
        let mut state = master::generate_from_config(&self.config);
        if let Some(agents) = &self.agents {
            state.agents = agents.clone();
        }
        if let Some(cells) = &self.cells {
            state.cells = cells.clone();
        }
        state
    }

    pub fn engine(&self, mode: Mode) -> SimulationEngine {
        SimulationEngine::new(&self.master(), mode)
    }

    pub fn comparison(&self) -> Comparison {
        Comparison::from_master(self.config.clone(), self.master())
    }
}
