//! Canonical initial conditions shared by the three mode engines.

use crate::config::EngineConfig;
use crate::rng::SimRng;
use dissipation_data::data::agent::INITIAL_AGENT_ENERGY;
use dissipation_data::{Agent, MasterState};

/// Cell energy inside the initial disc.
pub const HIGH_ENERGY: f64 = 15.0;
/// Cell energy everywhere else.
pub const LOW_ENERGY: f64 = 1.0;

/// Builds the master state.
///
/// The grid depends only on `grid_size` and `initial_spread`; agent positions
/// come from a single stream seeded with `seed`, x drawn before y.
#[must_use]
pub fn generate(
    seed: u64,
    grid_size: usize,
    initial_spread: f64,
    initial_agent_count: usize,
) -> MasterState {
    let center = (grid_size / 2) as f64;
    let mut cells = Vec::with_capacity(grid_size * grid_size);
    for y in 0..grid_size {
        for x in 0..grid_size {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            cells.push(if dist < initial_spread {
                HIGH_ENERGY
            } else {
                LOW_ENERGY
            });
        }
    }

    let mut rng = SimRng::new(seed);
    let size = grid_size as f64;
    let agents = (0..initial_agent_count)
        .map(|_| {
            let x = rng.next_f64() * size;
            let y = rng.next_f64() * size;
            Agent::new(x, y, INITIAL_AGENT_ENERGY)
        })
        .collect();

    MasterState {
        seed,
        grid_size,
        cells,
        agents,
    }
}

/// [`generate`] driven by an engine config.
#[must_use]
pub fn generate_from_config(config: &EngineConfig) -> MasterState {
    generate(
        config.seed,
        config.grid_size,
        config.initial_spread,
        config.initial_agents,
    )
}
