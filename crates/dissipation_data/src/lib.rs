//! Plain data shared by the dissipation engine, its exporters and its hosts.

pub mod data;

pub use data::agent::Agent;
pub use data::master::MasterState;
pub use data::mode::Mode;
pub use data::stats::{ComparisonRecord, StepStats};
pub use data::sweep::{SweepResult, SweepStatus};
