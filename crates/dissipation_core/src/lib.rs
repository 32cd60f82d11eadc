//! # Dissipation Core
//!
//! Deterministic, energy-conserving engine comparing three dissipation regimes
//! on a shared grid: no agents (`off`), random walkers (`random`) and
//! metabolising chemotactic agents (`life`).
//!
//! This crate contains:
//! - The energy grid and its sequential diffusion sweep
//! - Per-mode agent rules and the life-mode lifecycle
//! - The per-tick engine with its conservation audit
//! - The lockstep three-engine comparison and the phase-diagram sweep
//!
//! ## Example
//!
//! ```
//! use dissipation_core::comparison::Comparison;
//! use dissipation_core::config::EngineConfig;
//!
//! let mut cmp = Comparison::new(EngineConfig {
//!     grid_size: 20,
//!     initial_agents: 10,
//!     ..Default::default()
//! });
//! let record = cmp.advance();
//! assert_eq!(record.off.agent_count, 0);
//! assert!(record.life.energy_error.abs() < 1e-3);
//! ```

/// Per-mode agent update rules and the lifecycle pass
pub mod agents;
/// Three engines advanced in lockstep from one master state
pub mod comparison;
/// Configuration management for engine and sweep parameters
pub mod config;
/// Engine state record, tick function and conservation audit
pub mod engine;
/// Energy grid and diffusion
pub mod grid;
/// Master-state generation
pub mod master;
/// Run metrics and logging setup
pub mod metrics;
/// Seeded random streams
pub mod rng;
/// Read-only engine snapshots for renderers
pub mod snapshot;
/// Phase-diagram sweep orchestration
pub mod sweep;

pub use comparison::Comparison;
pub use config::{AppConfig, EngineConfig, SweepConfig};
pub use engine::{EngineState, SimulationEngine};
pub use metrics::{init_logging, Metrics};
pub use sweep::{SweepOrchestrator, SweepPhase, SweepProgress};
