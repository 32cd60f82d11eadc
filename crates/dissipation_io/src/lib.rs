//! # Dissipation IO
//!
//! Export and persistence layer for the dissipation engine.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - CSV exports for manual runs and phase-diagram sweeps
//! - Master-state checkpoints (rkyv) and compressed sweep archives

/// Error types and result aliases for I/O operations
pub mod error;
/// CSV exports with a leading metadata line
pub mod export;
/// Checkpoint and archive persistence
pub mod persistence;

pub use error::{IoError, Result};
pub use export::{write_comparison_file, write_sweep_file, RunMetadata};
pub use persistence::{load_master_state, load_results, save_master_state, save_results};
