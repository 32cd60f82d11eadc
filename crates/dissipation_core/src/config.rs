//! Configuration management for engine and sweep parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults, missing fields fall back)
//! 3. Command-line overrides applied by the host (`--seed`)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [engine]
//! grid_size = 50
//! inflow_rate = 5.0
//! consumption_rate = 1.5
//! seed = 12345
//!
//! [sweep]
//! inflow_min = 1.0
//! inflow_max = 9.0
//! ```

use serde::{Deserialize, Serialize};

/// Parameters of a single engine instance.
///
/// The mode is not part of the config: every engine carries its mode as
/// identity, and the three engines of a comparison share one config.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub grid_size: usize,
    /// Energy injected into the centre cell every tick.
    pub inflow_rate: f64,
    /// Upper bound on what a life agent eats from its cell per tick.
    pub consumption_rate: f64,
    pub diffusion_speed: f64,
    /// Fraction of a source cell's content that may leave it through one edge.
    pub diffusion_cap: f64,
    pub initial_agents: usize,
    /// Radius of the high-energy disc around the grid centre.
    pub initial_spread: f64,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 50,
            inflow_rate: 5.0,
            consumption_rate: 1.5,
            diffusion_speed: 0.5,
            diffusion_cap: 0.2,
            initial_agents: 60,
            initial_spread: 8.0,
            seed: 12345,
        }
    }
}

impl EngineConfig {
    /// Copy of this config with a sweep point's rates substituted.
    #[must_use]
    pub fn with_rates(&self, inflow_rate: f64, consumption_rate: f64) -> Self {
        Self {
            inflow_rate,
            consumption_rate,
            ..self.clone()
        }
    }
}

/// Phase-diagram sweep bounds and per-point tick schedule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    pub inflow_min: f64,
    pub inflow_max: f64,
    pub consumption_min: f64,
    pub consumption_max: f64,
    /// Ticks simulated per point.
    pub total_ticks: u64,
    /// Leading ticks of each point that are discarded.
    pub burn_in_ticks: u64,
    /// Ticks after the burn-in that feed the accumulator.
    pub measure_ticks: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            inflow_min: 1.0,
            inflow_max: 9.0,
            consumption_min: 0.5,
            consumption_max: 2.5,
            total_ticks: 650,
            burn_in_ticks: 350,
            measure_ticks: 250,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub sweep: SweepConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure. The engine itself never re-checks these;
    /// a degenerate config must be rejected here, before an engine is built.
    pub fn validate(&self) -> anyhow::Result<()> {
        let e = &self.engine;
        anyhow::ensure!(e.grid_size > 0, "Grid size must be positive");
        anyhow::ensure!(e.grid_size <= 1000, "Grid size too large (max 1000)");
        anyhow::ensure!(
            e.inflow_rate.is_finite() && e.inflow_rate >= 0.0,
            "Inflow rate must be finite and non-negative"
        );
        anyhow::ensure!(
            e.consumption_rate.is_finite() && e.consumption_rate >= 0.0,
            "Consumption rate must be finite and non-negative"
        );
        anyhow::ensure!(
            e.diffusion_speed.is_finite() && e.diffusion_speed >= 0.0,
            "Diffusion speed must be finite and non-negative"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&e.diffusion_cap),
            "Diffusion cap must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            e.initial_agents <= 10_000,
            "Initial agent count too large (max 10000)"
        );
        anyhow::ensure!(
            e.initial_spread.is_finite() && e.initial_spread >= 0.0,
            "Initial spread must be finite and non-negative"
        );

        let s = &self.sweep;
        anyhow::ensure!(
            s.inflow_min <= s.inflow_max,
            "Sweep inflow_min must not exceed inflow_max"
        );
        anyhow::ensure!(
            s.consumption_min <= s.consumption_max,
            "Sweep consumption_min must not exceed consumption_max"
        );
        anyhow::ensure!(
            s.inflow_min >= 0.0 && s.consumption_min >= 0.0,
            "Sweep bounds must be non-negative"
        );
        anyhow::ensure!(s.measure_ticks > 0, "Measurement window must be positive");
        anyhow::ensure!(
            s.burn_in_ticks + s.measure_ticks <= s.total_ticks,
            "Burn-in plus measurement window exceeds total ticks per point"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path, "No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.engine).as_bytes());
        hasher.update(format!("{:?}", self.sweep).as_bytes());
        hex::encode(hasher.finalize())
    }
}
