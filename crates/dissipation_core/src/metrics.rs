//! Run metrics and logging setup.
//!
//! Provides structured logging and lightweight counters for headless runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Ticks between periodic progress lines.
pub const LOG_INTERVAL: u64 = 1000;

/// Counters for one host run.
pub struct Metrics {
    tick_count: AtomicU64,
    agent_count: AtomicU64,
    violations: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            agent_count: AtomicU64::new(0),
            violations: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed host tick. `worst_error` is the largest absolute
    /// conservation residual among the engines advanced in that tick.
    pub fn record_tick(&self, agents: usize, worst_error: f64) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.agent_count.store(agents as u64, Ordering::Relaxed);
        if worst_error.abs() > crate::engine::AUDIT_TOLERANCE {
            self.violations.fetch_add(1, Ordering::Relaxed);
        }

        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % LOG_INTERVAL == 0 {
            tracing::info!(
                tick,
                agents,
                worst_error,
                elapsed_ms = self.elapsed().as_millis() as u64,
                "Simulation tick"
            );
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn agent_count(&self) -> u64 {
        self.agent_count.load(Ordering::Relaxed)
    }

    /// Ticks whose residual exceeded the audit tolerance.
    #[must_use]
    pub fn violations(&self) -> u64 {
        self.violations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
