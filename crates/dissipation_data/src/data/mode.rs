use serde::{Deserialize, Serialize};
use std::fmt;

/// Dissipation regime of one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// No agents; only inflow and diffusion.
    #[default]
    Off,
    /// Agents pay a flat cost, graze and random-walk.
    Random,
    /// Metabolising, chemotactic agents that die and reproduce.
    Life,
}

impl Mode {
    /// Fixed advance order of the three engines within one host tick.
    pub const ALL: [Mode; 3] = [Mode::Off, Mode::Random, Mode::Life];

    /// Added to the run seed so every mode owns an independent random stream.
    #[must_use]
    pub fn salt(self) -> u64 {
        match self {
            Mode::Off => 0,
            Mode::Random => 0x5241_4E44,
            Mode::Life => 0x4C49_4645,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Off => "off",
            Mode::Random => "random",
            Mode::Life => "life",
        }
    }

    /// Agent fill colour used by renderers.
    #[must_use]
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Mode::Off => (128, 128, 128),
            Mode::Random => (80, 160, 255),
            Mode::Life => (80, 255, 120),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
