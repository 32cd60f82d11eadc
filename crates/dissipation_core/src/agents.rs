//! Per-mode agent rules and the life-mode lifecycle pass.
//!
//! Agents are processed strictly in population order. Each agent's reads and
//! writes on the grid are visible to the agents after it in the same tick.

use crate::grid::GridField;
use crate::rng::SimRng;
use dissipation_data::Agent;
use std::f64::consts::FRAC_PI_4;

/// Flat per-tick cost of a random-mode agent.
pub const RANDOM_ACTIVITY_COST: f64 = 0.5;
/// Most a random-mode agent can graze from its cell per tick.
pub const RANDOM_INTAKE: f64 = 0.5;
/// Random-walk displacement per axis is `(u - 0.5) * RANDOM_STEP`.
pub const RANDOM_STEP: f64 = 4.0;

pub const BASAL_COST: f64 = 0.45;
pub const MOVE_COST: f64 = 0.05;
pub const SENSE_RADIUS: f64 = 2.0;
pub const SENSE_DIRECTIONS: usize = 8;
pub const DEATH_THRESHOLD: f64 = 0.2;
pub const REPRODUCTION_THRESHOLD: f64 = 10.0;

/// Outcome of one lifecycle pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LifecycleReport {
    pub deaths: usize,
    pub births: usize,
    /// Energy handed back to the grid by dying agents.
    pub returned_energy: f64,
}

/// Takes up to `cost` from the agent and returns the amount actually paid.
/// An agent never goes into debt.
#[inline]
fn pay(agent: &mut Agent, cost: f64) -> f64 {
    let paid = cost.min(agent.energy.max(0.0));
    agent.energy -= paid;
    paid
}

/// Toroidal wrap into `[0, size)`.
#[inline]
fn wrap(v: f64, size: f64) -> f64 {
    let w = v.rem_euclid(size);
    if w >= size {
        0.0
    } else {
        w
    }
}

/// Random mode: pay, graze, random-walk. Population size never changes.
///
/// Returns the activity heat generated.
pub fn update_random(agents: &mut [Agent], grid: &mut GridField, rng: &mut SimRng) -> f64 {
    let size = grid.size as f64;
    let mut heat = 0.0;

    for agent in agents.iter_mut() {
        heat += pay(agent, RANDOM_ACTIVITY_COST);

        let idx = grid.cell_at(agent.x, agent.y);
        agent.energy += grid.draw(idx, RANDOM_INTAKE);

        let dx = (rng.next_f64() - 0.5) * RANDOM_STEP;
        let dy = (rng.next_f64() - 0.5) * RANDOM_STEP;
        agent.x = wrap(agent.x + dx, size);
        agent.y = wrap(agent.y + dy, size);
    }

    heat
}

/// Unit heading toward the richest of the sensed directions.
///
/// The current heading is read as the angle `atan2(vy, vx)`, so a zero
/// heading points along +x. That unit heading, sampled at the same radius,
/// is the starting candidate; a direction must be strictly richer to
/// replace it.
#[must_use]
pub fn chemotaxis(agent: &Agent, grid: &GridField) -> (f64, f64) {
    let (sin, cos) = agent.vy.atan2(agent.vx).sin_cos();
    let mut heading = (cos, sin);
    let mut best = grid.sample(agent.x + cos * SENSE_RADIUS, agent.y + sin * SENSE_RADIUS);

    for k in 0..SENSE_DIRECTIONS {
        let angle = k as f64 * FRAC_PI_4;
        let (sin, cos) = angle.sin_cos();
        let value = grid.sample(agent.x + cos * SENSE_RADIUS, agent.y + sin * SENSE_RADIUS);
        if value > best {
            best = value;
            heading = (cos, sin);
        }
    }

    heading
}

/// Life-mode movement phase for a single agent. Returns activity heat.
fn step_life_agent(agent: &mut Agent, grid: &mut GridField, consumption_rate: f64) -> f64 {
    let size = grid.size as f64;
    let mut heat = pay(agent, BASAL_COST);

    let idx = grid.cell_at(agent.x, agent.y);
    agent.energy += grid.draw(idx, consumption_rate);

    let (vx, vy) = chemotaxis(agent, grid);
    agent.vx = vx;
    agent.vy = vy;

    heat += pay(agent, MOVE_COST);

    agent.x = wrap(agent.x + vx, size);
    agent.y = wrap(agent.y + vy, size);
    heat
}

/// Death and reproduction, applied after every agent has moved.
///
/// A dying agent's remaining energy goes back into the cell under it; that is
/// a transfer inside the ledger, not heat. Survivors keep their relative
/// order and newborns are appended in creation order.
pub fn apply_lifecycle(agents: &mut Vec<Agent>, grid: &mut GridField) -> LifecycleReport {
    let mut report = LifecycleReport::default();
    let mut newborns = Vec::new();

    agents.retain_mut(|agent| {
        if agent.energy < DEATH_THRESHOLD {
            let idx = grid.cell_at(agent.x, agent.y);
            grid.inject(idx, agent.energy);
            report.returned_energy += agent.energy;
            report.deaths += 1;
            false
        } else {
            if agent.energy > REPRODUCTION_THRESHOLD {
                newborns.push(agent.split());
            }
            true
        }
    });

    report.births = newborns.len();
    agents.extend(newborns);
    report
}

/// Life mode: movement phase for every agent, then the lifecycle pass.
///
/// Returns the activity heat generated and what the lifecycle pass did.
pub fn update_life(
    agents: &mut Vec<Agent>,
    grid: &mut GridField,
    consumption_rate: f64,
) -> (f64, LifecycleReport) {
    let mut heat = 0.0;
    for agent in agents.iter_mut() {
        heat += step_life_agent(agent, grid, consumption_rate);
    }
    let report = apply_lifecycle(agents, grid);
    (heat, report)
}
