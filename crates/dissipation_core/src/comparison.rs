//! Lockstep three-engine comparison driven one tick at a time by the host.

use crate::config::EngineConfig;
use crate::engine::SimulationEngine;
use crate::master;
use crate::snapshot::EngineSnapshot;
use dissipation_data::{ComparisonRecord, MasterState, Mode};

/// Off, random and life engines started from one master state.
///
/// [`Comparison::advance`] updates the engines in the fixed order of
/// [`Mode::ALL`], so all three see the same inflow at the same logical tick.
#[derive(Debug, Clone)]
pub struct Comparison {
    config: EngineConfig,
    master: MasterState,
    engines: [SimulationEngine; 3],
    tick: u64,
}

impl Comparison {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let master = master::generate_from_config(&config);
        Self::from_master(config, master)
    }

    /// Starts from an existing master state, e.g. one loaded from a checkpoint.
    #[must_use]
    pub fn from_master(config: EngineConfig, master: MasterState) -> Self {
        let engines = Mode::ALL.map(|mode| SimulationEngine::new(&master, mode));
        Self {
            config,
            master,
            engines,
            tick: 0,
        }
    }

    /// Rewinds all three engines to the master state.
    pub fn reset(&mut self) {
        for engine in &mut self.engines {
            engine.reset(&self.master);
        }
        self.tick = 0;
    }

    /// Replaces the config and regenerates the master state from it.
    pub fn reconfigure(&mut self, config: EngineConfig) {
        self.master = master::generate_from_config(&config);
        self.config = config;
        self.reset();
    }

    /// Runs one tick on every engine.
    pub fn advance(&mut self) -> ComparisonRecord {
        let [off, random, life] = &mut self.engines;
        let off = off.update(&self.config);
        let random = random.update(&self.config);
        let life = life.update(&self.config);
        self.tick += 1;
        ComparisonRecord {
            tick: self.tick,
            off,
            random,
            life,
        }
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn master(&self) -> &MasterState {
        &self.master
    }

    #[must_use]
    pub fn engine(&self, mode: Mode) -> &SimulationEngine {
        match mode {
            Mode::Off => &self.engines[0],
            Mode::Random => &self.engines[1],
            Mode::Life => &self.engines[2],
        }
    }

    /// Read-only copy of one engine for a renderer.
    #[must_use]
    pub fn snapshot(&self, mode: Mode) -> EngineSnapshot {
        EngineSnapshot::capture(self.engine(mode).state())
    }
}
