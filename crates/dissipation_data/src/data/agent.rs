use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};

/// Energy every agent starts with when drawn by the master-state generator.
pub const INITIAL_AGENT_ENERGY: f64 = 2.0;

/// A single agent on the toroidal grid.
///
/// `energy` is conceptually non-negative; costs are always bounded by what the
/// agent holds, and the lifecycle pass returns whatever is left to the grid
/// when the agent dies.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct Agent {
    pub x: f64,
    pub y: f64,
    pub energy: f64,
    /// Heading, a unit vector once chemotaxis has picked a direction.
    pub vx: f64,
    pub vy: f64,
}

impl Agent {
    #[must_use]
    pub fn new(x: f64, y: f64, energy: f64) -> Self {
        Self {
            x,
            y,
            energy,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Halves this agent's energy and returns a co-located clone carrying the
    /// other half.
    pub fn split(&mut self) -> Agent {
        self.energy *= 0.5;
        *self
    }

    #[must_use]
    pub fn with_heading(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }
}
