//! One engine instance: state record, tick function and conservation audit.
//!
//! Every tick runs four phases in a fixed order:
//! 1. external inflow into the centre cell
//! 2. one diffusion sweep
//! 3. the mode's agent update
//! 4. heat bookkeeping and the conservation audit
//!
//! The audit checks
//! `internal_energy + cumulative_heat == initial_stock + total_inflow`
//! and reports the residual as `energy_error` in every [`StepStats`].

use crate::agents::{self, LifecycleReport};
use crate::config::EngineConfig;
use crate::grid::GridField;
use crate::rng::SimRng;
use dissipation_data::{Agent, MasterState, Mode, StepStats};

/// Residual above which a tick is logged as a conservation violation.
pub const AUDIT_TOLERANCE: f64 = 1e-6;

/// Everything one engine owns between ticks.
///
/// Built from a clone of the master state; nothing in here is shared with the
/// other engines of a comparison.
#[derive(Debug, Clone)]
pub struct EngineState {
    pub mode: Mode,
    pub grid: GridField,
    pub agents: Vec<Agent>,
    pub initial_stock: f64,
    pub total_inflow: f64,
    pub cumulative_heat: f64,
    pub step_heat_diff: f64,
    pub step_heat_act: f64,
    pub tick: u64,
    pub rng: SimRng,
    pub last_lifecycle: LifecycleReport,
}

impl EngineState {
    /// Fresh state for `mode` from the master state.
    ///
    /// `off` never carries agents. The random stream is seeded with
    /// `master.seed + mode.salt()`.
    #[must_use]
    pub fn reset(master: &MasterState, mode: Mode) -> Self {
        let grid = GridField::from_cells(master.grid_size, master.cells.clone());
        let agents = match mode {
            Mode::Off => Vec::new(),
            Mode::Random | Mode::Life => master.agents.clone(),
        };

        let mut state = Self {
            mode,
            grid,
            agents,
            initial_stock: 0.0,
            total_inflow: 0.0,
            cumulative_heat: 0.0,
            step_heat_diff: 0.0,
            step_heat_act: 0.0,
            tick: 0,
            rng: SimRng::salted(master.seed, mode.salt()),
            last_lifecycle: LifecycleReport::default(),
        };
        state.initial_stock = state.internal_energy();
        state
    }

    /// Grid energy plus agent energy.
    #[must_use]
    pub fn internal_energy(&self) -> f64 {
        self.grid.total_energy() + self.agents.iter().map(|a| a.energy).sum::<f64>()
    }

    /// Conservation residual at the current tick boundary.
    #[must_use]
    pub fn energy_error(&self) -> f64 {
        (self.internal_energy() + self.cumulative_heat) - (self.initial_stock + self.total_inflow)
    }
}

/// Advances `state` by exactly one tick.
pub fn step(state: &mut EngineState, config: &EngineConfig) -> StepStats {
    let center = state.grid.center_index();
    state.grid.inject(center, config.inflow_rate);
    state.total_inflow += config.inflow_rate;

    state.step_heat_diff = state
        .grid
        .diffuse(config.diffusion_speed, config.diffusion_cap);

    state.step_heat_act = match state.mode {
        Mode::Off => 0.0,
        Mode::Random => agents::update_random(&mut state.agents, &mut state.grid, &mut state.rng),
        Mode::Life => {
            let (heat, report) =
                agents::update_life(&mut state.agents, &mut state.grid, config.consumption_rate);
            if report.deaths > 0 || report.births > 0 {
                tracing::debug!(
                    tick = state.tick + 1,
                    deaths = report.deaths,
                    births = report.births,
                    returned = report.returned_energy,
                    "Lifecycle"
                );
            }
            state.last_lifecycle = report;
            heat
        }
    };

    let delta_heat = state.step_heat_diff + state.step_heat_act;
    state.cumulative_heat += delta_heat;
    state.tick += 1;

    let energy_error = state.energy_error();
    if energy_error.abs() > AUDIT_TOLERANCE {
        tracing::warn!(
            mode = %state.mode,
            tick = state.tick,
            energy_error,
            "Conservation residual above tolerance"
        );
    }

    StepStats {
        delta_heat,
        total_heat: state.cumulative_heat,
        heat_diff: state.step_heat_diff,
        heat_act: state.step_heat_act,
        agent_count: state.agents.len(),
        energy_error,
    }
}

/// Owner of one [`EngineState`] with a fixed mode identity.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    state: EngineState,
}

impl SimulationEngine {
    #[must_use]
    pub fn new(master: &MasterState, mode: Mode) -> Self {
        Self {
            state: EngineState::reset(master, mode),
        }
    }

    /// Discards the current state and starts over from `master`.
    pub fn reset(&mut self, master: &MasterState) {
        self.state = EngineState::reset(master, self.state.mode);
    }

    pub fn update(&mut self, config: &EngineConfig) -> StepStats {
        step(&mut self.state, config)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master;

    fn config() -> EngineConfig {
        EngineConfig {
            grid_size: 20,
            initial_agents: 30,
            initial_spread: 4.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_reset_off_has_no_agents() {
        let cfg = config();
        let m = master::generate_from_config(&cfg);
        let state = EngineState::reset(&m, Mode::Off);
        assert!(state.agents.is_empty());
        assert_eq!(state.initial_stock, m.cells.iter().sum::<f64>());
    }

    #[test]
    fn test_reset_copies_master() {
        let cfg = config();
        let m = master::generate_from_config(&cfg);
        let state = EngineState::reset(&m, Mode::Life);
        assert_eq!(state.agents, m.agents);
        assert_eq!(state.grid.cells, m.cells);
        assert_eq!(state.initial_stock, state.internal_energy());
        assert_eq!(state.rng.seed(), m.seed.wrapping_add(Mode::Life.salt()));
    }

    #[test]
    fn test_inflow_lands_in_center() {
        let cfg = EngineConfig {
            diffusion_speed: 0.0,
            ..config()
        };
        let m = master::generate_from_config(&cfg);
        let mut state = EngineState::reset(&m, Mode::Off);
        let center = state.grid.center_index();
        let before = state.grid.cells[center];
        let stats = step(&mut state, &cfg);
        assert_eq!(state.grid.cells[center], before + cfg.inflow_rate);
        assert_eq!(stats.delta_heat, 0.0);
        assert_eq!(state.total_inflow, cfg.inflow_rate);
    }

    #[test]
    fn test_each_mode_conserves() {
        let cfg = config();
        let m = master::generate_from_config(&cfg);
        for mode in Mode::ALL {
            let mut engine = SimulationEngine::new(&m, mode);
            for _ in 0..300 {
                let stats = engine.update(&cfg);
                assert!(
                    stats.energy_error.abs() < 1e-6,
                    "{mode} residual {}",
                    stats.energy_error
                );
                assert_eq!(stats.delta_heat, stats.heat_diff + stats.heat_act);
            }
            assert_eq!(engine.tick(), 300);
        }
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let cfg = config();
        let m = master::generate_from_config(&cfg);
        let mut engine = SimulationEngine::new(&m, Mode::Random);
        let first: Vec<StepStats> = (0..20).map(|_| engine.update(&cfg)).collect();
        engine.reset(&m);
        assert_eq!(engine.tick(), 0);
        let again: Vec<StepStats> = (0..20).map(|_| engine.update(&cfg)).collect();
        assert_eq!(first, again);
    }
}
