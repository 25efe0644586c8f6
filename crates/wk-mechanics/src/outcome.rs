//! Critical and fumble classification of a kept die result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A natural result that is always critical, whatever the configured range.
pub const NATURAL_CRITICAL: u32 = 20;

/// A natural result that is always a fumble.
pub const NATURAL_FUMBLE: u32 = 1;

/// Tri-state classification of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeClass {
    /// Neither critical nor fumble.
    #[default]
    Normal,
    /// Exceptional success.
    Critical,
    /// Exceptional failure.
    Fumble,
}

impl OutcomeClass {
    /// Style class for cards: `"critical"`, `"fumble"`, or empty.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Critical => "critical",
            Self::Fumble => "fumble",
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Critical => write!(f, "Critical"),
            Self::Fumble => write!(f, "Fumble"),
        }
    }
}

/// A critical range written as `"low-high"` (e.g. `"18-20"`) or a single
/// value (`"20"`). Only the lower bound matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalRange {
    raw: String,
    lower: Option<i64>,
}

impl CriticalRange {
    /// Read a range. Never fails: a range whose lower bound is not a number
    /// keeps only the natural-20 rule.
    pub fn parse(raw: &str) -> Self {
        let token = raw.split('-').next().unwrap_or_default().trim();
        let lower = token.parse::<i64>().ok();
        if lower.is_none() {
            tracing::warn!(range = raw, "critical range has no numeric lower bound");
        }
        Self {
            raw: raw.to_string(),
            lower,
        }
    }

    /// The parsed lower bound.
    pub fn lower_bound(&self) -> Option<i64> {
        self.lower
    }

    /// The range as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for CriticalRange {
    fn default() -> Self {
        Self::parse("20")
    }
}

impl From<&str> for CriticalRange {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for CriticalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Critical and fumble flags for one kept result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    /// The kept result is a critical.
    pub is_critical: bool,
    /// The kept result is a fumble.
    pub is_fumble: bool,
}

impl Classification {
    /// The tri-state class.
    pub fn class(&self) -> OutcomeClass {
        if self.is_fumble {
            OutcomeClass::Fumble
        } else if self.is_critical {
            OutcomeClass::Critical
        } else {
            OutcomeClass::Normal
        }
    }
}

/// Classify a kept die result against a critical range.
///
/// Critical when the result reaches the range's lower bound or is a natural
/// 20, on any die size. A natural 1 is a fumble and is never also critical.
pub fn classify(kept: u32, range: &CriticalRange) -> Classification {
    let is_fumble = kept == NATURAL_FUMBLE;
    let in_range = range
        .lower_bound()
        .is_some_and(|lower| i64::from(kept) >= lower);
    Classification {
        is_critical: !is_fumble && (in_range || kept == NATURAL_CRITICAL),
        is_fumble,
    }
}
