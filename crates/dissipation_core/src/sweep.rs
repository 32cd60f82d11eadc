//! Phase-diagram sweep over `(inflow, consumption)` points.
//!
//! The orchestrator is a state machine advanced one tick at a time by the
//! host:
//!
//! ```text
//! Idle -> BurnIn(i) -> Measuring(i) -> [finalise i] -> BurnIn(i+1) -> ... -> Done
//!             \______________\______ stop() ______> Stopped -- resume() --> (where it left off)
//! ```
//!
//! Each call to [`SweepOrchestrator::step`] runs exactly one tick of all three
//! engines, so a stop request always lands on a tick boundary and leaves every
//! engine in an auditable state.

use crate::comparison::Comparison;
use crate::config::{EngineConfig, SweepConfig};
use dissipation_data::{ComparisonRecord, SweepResult, SweepStatus};

/// Points per axis of the phase diagram.
pub const AXIS_POINTS: usize = 5;
/// Denominator used when the off-mode average heat is exactly zero.
pub const RATIO_EPSILON: f64 = 1e-9;

/// `AXIS_POINTS` evenly spaced values from `min` to `max`, rounded to three
/// decimals.
#[must_use]
pub fn linspace(min: f64, max: f64) -> Vec<f64> {
    let step = (max - min) / (AXIS_POINTS - 1) as f64;
    (0..AXIS_POINTS)
        .map(|i| round3(min + step * i as f64))
        .collect()
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Cartesian product of the inflow and consumption axes, inflow-major.
#[must_use]
pub fn build_queue(sweep: &SweepConfig) -> Vec<(f64, f64)> {
    let inflows = linspace(sweep.inflow_min, sweep.inflow_max);
    let consumptions = linspace(sweep.consumption_min, sweep.consumption_max);
    inflows
        .iter()
        .flat_map(|&i| consumptions.iter().map(move |&c| (i, c)))
        .collect()
}

/// Running sums over one point's measurement window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepAccumulator {
    pub count: u64,
    pub off_delta: f64,
    pub life_delta: f64,
    pub life_heat_diff: f64,
    pub life_heat_act: f64,
    pub agents_life: f64,
    pub agents_random: f64,
    pub error_min: f64,
    pub error_max: f64,
}

impl Default for SweepAccumulator {
    fn default() -> Self {
        Self {
            count: 0,
            off_delta: 0.0,
            life_delta: 0.0,
            life_heat_diff: 0.0,
            life_heat_act: 0.0,
            agents_life: 0.0,
            agents_random: 0.0,
            error_min: f64::INFINITY,
            error_max: f64::NEG_INFINITY,
        }
    }
}

impl SweepAccumulator {
    pub fn record(&mut self, record: &ComparisonRecord) {
        self.count += 1;
        self.off_delta += record.off.delta_heat;
        self.life_delta += record.life.delta_heat;
        self.life_heat_diff += record.life.heat_diff;
        self.life_heat_act += record.life.heat_act;
        self.agents_life += record.life.agent_count as f64;
        self.agents_random += record.random.agent_count as f64;
        self.error_min = self.error_min.min(record.life.energy_error);
        self.error_max = self.error_max.max(record.life.energy_error);
    }

    /// Averages the window and classifies the point.
    ///
    /// An empty window yields NaN averages and therefore `invalid`.
    #[must_use]
    pub fn finalize(&self, inflow: f64, consumption: f64) -> SweepResult {
        let n = self.count as f64;
        let avg_off_delta = self.off_delta / n;
        let avg_life_delta = self.life_delta / n;
        let avg_agents_life = self.agents_life / n;
        let denominator = if avg_off_delta != 0.0 {
            avg_off_delta
        } else {
            RATIO_EPSILON
        };

        SweepResult {
            inflow,
            consumption,
            avg_off_delta,
            avg_life_delta,
            ratio: avg_life_delta / denominator,
            avg_life_heat_diff: self.life_heat_diff / n,
            avg_life_heat_act: self.life_heat_act / n,
            avg_agents_life,
            avg_agents_random: self.agents_random / n,
            error_min: self.error_min,
            error_max: self.error_max,
            status: classify(avg_off_delta, avg_life_delta, avg_agents_life),
        }
    }
}

/// Phase-diagram category for one point's averages.
#[must_use]
pub fn classify(avg_off: f64, avg_life: f64, avg_agents_life: f64) -> SweepStatus {
    if !avg_off.is_finite() || !avg_life.is_finite() {
        SweepStatus::Invalid
    } else if avg_agents_life < 1.0 {
        SweepStatus::Dead
    } else if avg_life < avg_off {
        SweepStatus::Suppressor
    } else {
        SweepStatus::Accelerator
    }
}

/// Where the orchestrator currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepPhase {
    Idle,
    BurnIn,
    Measuring,
    Stopped,
    Done,
}

/// Value returned by every [`SweepOrchestrator::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct SweepProgress {
    pub phase: SweepPhase,
    /// Index of the point the tick belonged to.
    pub point: usize,
    pub total_points: usize,
    /// Ticks completed within `point`.
    pub point_tick: u64,
    /// Set on the tick that finalised `point`.
    pub finished: Option<SweepResult>,
}

/// Resumable sweep across the 25-point `(inflow, consumption)` grid.
pub struct SweepOrchestrator {
    base: EngineConfig,
    schedule: SweepConfig,
    queue: Vec<(f64, f64)>,
    phase: SweepPhase,
    /// Phase to return to on `resume()`.
    suspended: Option<SweepPhase>,
    point: usize,
    point_tick: u64,
    point_config: EngineConfig,
    comparison: Comparison,
    accumulator: SweepAccumulator,
    results: Vec<SweepResult>,
}

impl SweepOrchestrator {
    #[must_use]
    pub fn new(base: EngineConfig, schedule: SweepConfig) -> Self {
        let queue = build_queue(&schedule);
        let comparison = Comparison::new(base.clone());
        Self {
            point_config: base.clone(),
            base,
            schedule,
            queue,
            phase: SweepPhase::Idle,
            suspended: None,
            point: 0,
            point_tick: 0,
            comparison,
            accumulator: SweepAccumulator::default(),
            results: Vec::new(),
        }
    }

    /// Begins the sweep at the first point. No-op unless idle.
    pub fn start(&mut self) {
        if self.phase != SweepPhase::Idle {
            return;
        }
        self.results.clear();
        if self.queue.is_empty() {
            self.phase = SweepPhase::Done;
            return;
        }
        self.begin_point(0);
    }

    /// Requests cancellation. Because ticks are never split, the engines are
    /// left at the boundary of the last completed tick.
    pub fn stop(&mut self) {
        if matches!(self.phase, SweepPhase::BurnIn | SweepPhase::Measuring) {
            tracing::info!(
                point = self.point,
                point_tick = self.point_tick,
                "Sweep stopped"
            );
            self.suspended = Some(self.phase);
            self.phase = SweepPhase::Stopped;
        }
    }

    /// Continues a stopped sweep from exactly where it stopped.
    pub fn resume(&mut self) {
        if self.phase == SweepPhase::Stopped {
            if let Some(phase) = self.suspended.take() {
                self.phase = phase;
            }
        }
    }

    fn begin_point(&mut self, index: usize) {
        let (inflow, consumption) = self.queue[index];
        self.point = index;
        self.point_tick = 0;
        self.point_config = self.base.with_rates(inflow, consumption);
        self.comparison.reconfigure(self.point_config.clone());
        self.accumulator = SweepAccumulator::default();
        self.phase = if self.schedule.burn_in_ticks > 0 {
            SweepPhase::BurnIn
        } else {
            SweepPhase::Measuring
        };
        tracing::debug!(point = index, inflow, consumption, "Sweep point started");
    }

    /// Runs one tick of the current point.
    ///
    /// Outside `BurnIn`/`Measuring` this does nothing and just reports the
    /// current phase.
    pub fn step(&mut self) -> SweepProgress {
        if !matches!(self.phase, SweepPhase::BurnIn | SweepPhase::Measuring) {
            return self.progress(None);
        }

        let record = self.comparison.advance();
        let t = self.point_tick;
        let window_end = self.schedule.burn_in_ticks + self.schedule.measure_ticks;
        if t >= self.schedule.burn_in_ticks && t < window_end {
            self.accumulator.record(&record);
        }
        self.point_tick += 1;

        if self.point_tick >= self.schedule.total_ticks {
            let (inflow, consumption) = self.queue[self.point];
            let result = self.accumulator.finalize(inflow, consumption);
            tracing::info!(
                point = self.point,
                inflow,
                consumption,
                ratio = result.ratio,
                status = %result.status,
                "Sweep point finished"
            );
            self.results.push(result.clone());

            let finished_point = self.point;
            let finished_tick = self.point_tick;
            if self.point + 1 < self.queue.len() {
                self.begin_point(self.point + 1);
            } else {
                self.phase = SweepPhase::Done;
            }
            return SweepProgress {
                phase: self.phase,
                point: finished_point,
                total_points: self.queue.len(),
                point_tick: finished_tick,
                finished: Some(result),
            };
        }

        if self.point_tick >= self.schedule.burn_in_ticks {
            self.phase = SweepPhase::Measuring;
        }
        self.progress(None)
    }

    /// Steps until the sweep is done or stopped; returns all results so far.
    pub fn run_to_completion(&mut self) -> &[SweepResult] {
        if self.phase == SweepPhase::Idle {
            self.start();
        }
        while matches!(self.phase, SweepPhase::BurnIn | SweepPhase::Measuring) {
            self.step();
        }
        &self.results
    }

    fn progress(&self, finished: Option<SweepResult>) -> SweepProgress {
        SweepProgress {
            phase: self.phase,
            point: self.point,
            total_points: self.queue.len(),
            point_tick: self.point_tick,
            finished,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    #[must_use]
    pub fn queue(&self) -> &[(f64, f64)] {
        &self.queue
    }

    #[must_use]
    pub fn results(&self) -> &[SweepResult] {
        &self.results
    }

    /// Config in effect for the current point.
    #[must_use]
    pub fn point_config(&self) -> &EngineConfig {
        &self.point_config
    }

    #[must_use]
    pub fn accumulator(&self) -> &SweepAccumulator {
        &self.accumulator
    }

    #[must_use]
    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dissipation_data::StepStats;

    fn tiny_schedule() -> SweepConfig {
        SweepConfig {
            inflow_min: 1.0,
            inflow_max: 3.0,
            consumption_min: 0.5,
            consumption_max: 1.5,
            total_ticks: 12,
            burn_in_ticks: 5,
            measure_ticks: 4,
        }
    }

    fn tiny_engine() -> EngineConfig {
        EngineConfig {
            grid_size: 10,
            initial_agents: 8,
            initial_spread: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_linspace_five_points_rounded() {
        assert_eq!(linspace(1.0, 9.0), vec![1.0, 3.0, 5.0, 7.0, 9.0]);
        assert_eq!(linspace(0.1, 0.2), vec![0.1, 0.125, 0.15, 0.175, 0.2]);
        assert_eq!(linspace(0.0, 1.0 / 3.0)[1], 0.083);
    }

    #[test]
    fn test_queue_is_inflow_major_product() {
        let queue = build_queue(&tiny_schedule());
        assert_eq!(queue.len(), 25);
        assert_eq!(queue[0], (1.0, 0.5));
        assert_eq!(queue[1], (1.0, 0.75));
        assert_eq!(queue[5], (1.5, 0.5));
        assert_eq!(queue[24], (3.0, 1.5));
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(1.0, 5.0, 0.5), SweepStatus::Dead);
        assert_eq!(classify(5.0, 1.0, 0.99), SweepStatus::Dead);
        assert_eq!(classify(5.0, 1.0, 1.0), SweepStatus::Suppressor);
        assert_eq!(classify(1.0, 5.0, 3.0), SweepStatus::Accelerator);
        assert_eq!(classify(2.0, 2.0, 3.0), SweepStatus::Accelerator);
        assert_eq!(classify(f64::NAN, 1.0, 3.0), SweepStatus::Invalid);
        assert_eq!(classify(1.0, f64::INFINITY, 0.0), SweepStatus::Invalid);
    }

    #[test]
    fn test_empty_accumulator_is_invalid() {
        let result = SweepAccumulator::default().finalize(1.0, 1.0);
        assert_eq!(result.status, SweepStatus::Invalid);
    }

    #[test]
    fn test_ratio_uses_epsilon_for_zero_off_heat() {
        let mut acc = SweepAccumulator::default();
        let record = ComparisonRecord {
            tick: 1,
            off: StepStats::default(),
            random: StepStats {
                agent_count: 4,
                ..Default::default()
            },
            life: StepStats {
                delta_heat: 2.0,
                agent_count: 3,
                energy_error: 1e-12,
                ..Default::default()
            },
        };
        acc.record(&record);
        let result = acc.finalize(0.0, 1.0);
        assert_eq!(result.ratio, 2.0 / RATIO_EPSILON);
        assert!(result.ratio.is_finite());
        assert_eq!(result.avg_agents_random, 4.0);
        assert_eq!(result.error_min, 1e-12);
        assert_eq!(result.error_max, 1e-12);
        assert_eq!(result.status, SweepStatus::Accelerator);
    }

    #[test]
    fn test_state_machine_runs_every_point() {
        let mut sweep = SweepOrchestrator::new(tiny_engine(), tiny_schedule());
        assert_eq!(sweep.phase(), SweepPhase::Idle);
        sweep.start();
        assert_eq!(sweep.phase(), SweepPhase::BurnIn);

        let mut finished = 0;
        let mut ticks = 0;
        while sweep.phase() != SweepPhase::Done {
            let progress = sweep.step();
            ticks += 1;
            if let Some(result) = progress.finished {
                assert_eq!(progress.point, finished);
                assert_eq!(progress.point_tick, 12);
                assert_ne!(result.status, SweepStatus::Invalid);
                finished += 1;
            }
        }
        assert_eq!(finished, 25);
        assert_eq!(ticks, 25 * 12);
        assert_eq!(sweep.results().len(), 25);
    }

    #[test]
    fn test_measurement_window_counts() {
        let mut sweep = SweepOrchestrator::new(tiny_engine(), tiny_schedule());
        sweep.start();
        for _ in 0..5 {
            assert_eq!(sweep.phase(), SweepPhase::BurnIn);
            sweep.step();
        }
        assert_eq!(sweep.accumulator().count, 0);
        assert_eq!(sweep.phase(), SweepPhase::Measuring);
        for _ in 0..6 {
            sweep.step();
        }
        // Ticks 9..12 run but fall outside the window.
        assert_eq!(sweep.accumulator().count, 4);
    }

    #[test]
    fn test_point_config_overrides_rates() {
        let mut sweep = SweepOrchestrator::new(tiny_engine(), tiny_schedule());
        sweep.start();
        assert_eq!(sweep.point_config().inflow_rate, 1.0);
        assert_eq!(sweep.point_config().consumption_rate, 0.5);
        for _ in 0..12 {
            sweep.step();
        }
        assert_eq!(sweep.point_config().consumption_rate, 0.75);
        assert_eq!(sweep.comparison().tick(), 0);
    }

    #[test]
    fn test_stop_and_resume_matches_uninterrupted() {
        let mut reference = SweepOrchestrator::new(tiny_engine(), tiny_schedule());
        let expected = reference.run_to_completion().to_vec();

        let mut sweep = SweepOrchestrator::new(tiny_engine(), tiny_schedule());
        sweep.start();
        for _ in 0..40 {
            sweep.step();
        }
        sweep.stop();
        assert_eq!(sweep.phase(), SweepPhase::Stopped);
        let idle = sweep.step();
        assert_eq!(idle.phase, SweepPhase::Stopped);
        assert_eq!(idle.finished, None);

        sweep.resume();
        assert_ne!(sweep.phase(), SweepPhase::Stopped);
        assert_eq!(sweep.run_to_completion(), expected.as_slice());
    }

    #[test]
    fn test_stop_ignored_when_idle_or_done() {
        let mut sweep = SweepOrchestrator::new(tiny_engine(), tiny_schedule());
        sweep.stop();
        assert_eq!(sweep.phase(), SweepPhase::Idle);
        sweep.run_to_completion();
        sweep.stop();
        assert_eq!(sweep.phase(), SweepPhase::Done);
    }
}
