//! Headless host for the dissipation engine.
//!
//! The engine itself lives in `dissipation_core`; this crate only drives it
//! tick by tick and hands the results to `dissipation_io`.

pub mod runner;

pub use dissipation_core::{AppConfig, Comparison, EngineConfig, Metrics, SweepConfig};
pub use dissipation_data::{ComparisonRecord, Mode, StepStats, SweepResult, SweepStatus};
pub use runner::{run_comparison, run_sweep, SweepOutcome};
