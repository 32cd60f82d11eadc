//! Core data structures for the dissipation simulation.

pub mod agent;
pub mod master;
pub mod mode;
pub mod stats;
pub mod sweep;
