//! Dice types, pools, formulas, and rolling.
//!
//! Supports standard polyhedral dice (d4 through d100) and custom dice.
//! A pool may keep only its highest or lowest dice; the first kept die is
//! the one that counts for critical and fumble checks.

pub mod formula;
pub mod pool;
pub mod roll;

pub use formula::{Formula, FormulaBuilder};
pub use pool::{DicePool, Keep};
pub use roll::{DieResult, RollResult};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Build a die from its number of sides. Dice need at least two sides.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            0 | 1 => None,
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            n => Some(Self::Custom(n)),
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
