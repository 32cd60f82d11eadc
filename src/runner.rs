//! Tick loops used by the CLI.

use dissipation_core::sweep::{SweepOrchestrator, SweepPhase};
use dissipation_core::{AppConfig, Comparison, Metrics};
use dissipation_data::{ComparisonRecord, Mode, SweepResult};

/// Runs `ticks` lockstep ticks of a comparison and returns one record per tick.
pub fn run_comparison(
    comparison: &mut Comparison,
    ticks: u64,
    metrics: &Metrics,
) -> Vec<ComparisonRecord> {
    let mut records = Vec::with_capacity(ticks as usize);
    for _ in 0..ticks {
        let record = comparison.advance();
        let worst_error = record
            .off
            .energy_error
            .abs()
            .max(record.random.energy_error.abs())
            .max(record.life.energy_error.abs());
        metrics.record_tick(record.life.agent_count, worst_error);
        records.push(record);
    }
    records
}

/// Results of a sweep run, possibly cut short.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub phase: SweepPhase,
    pub results: Vec<SweepResult>,
}

/// Runs the phase-diagram sweep.
///
/// With `stop_after` set, the orchestrator is stopped once that many ticks
/// have run, and the outcome carries only the points finished by then.
pub fn run_sweep(config: &AppConfig, stop_after: Option<u64>, metrics: &Metrics) -> SweepOutcome {
    let mut sweep = SweepOrchestrator::new(config.engine.clone(), config.sweep.clone());
    sweep.start();

    let mut ticks = 0u64;
    while matches!(sweep.phase(), SweepPhase::BurnIn | SweepPhase::Measuring) {
        if stop_after.is_some_and(|limit| ticks >= limit) {
            sweep.stop();
            break;
        }
        let progress = sweep.step();
        ticks += 1;

        let life = sweep.comparison().engine(Mode::Life).state();
        metrics.record_tick(life.agents.len(), life.energy_error());

        if let Some(result) = progress.finished {
            tracing::debug!(
                point = progress.point + 1,
                total = progress.total_points,
                status = %result.status,
                "Sweep progress"
            );
        }
    }

    SweepOutcome {
        phase: sweep.phase(),
        results: sweep.results().to_vec(),
    }
}
