//! Bounded resources owned by actors and items.
//!
//! Every resource here keeps its value inside its bounds. Out-of-range input,
//! whether from a constructor or a deserialized document, is clamped rather
//! than rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-round action points spent to perform costed actions.
///
/// Invariant: `0 <= value <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawActionPool")]
pub struct ActionPool {
    /// Action points currently available.
    pub value: i32,
    /// Action points restored at the start of each round.
    pub max: i32,
}

#[derive(Deserialize)]
struct RawActionPool {
    value: Option<i32>,
    max: i32,
}

impl From<RawActionPool> for ActionPool {
    fn from(raw: RawActionPool) -> Self {
        // A pool that was never written starts full.
        Self::new(raw.value.unwrap_or(raw.max), raw.max)
    }
}

impl ActionPool {
    /// Create a pool, clamping `value` into `0..=max`.
    pub fn new(value: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            value: value.clamp(0, max),
            max,
        }
    }

    /// Create a pool starting at its maximum.
    pub fn full(max: i32) -> Self {
        Self::new(max, max)
    }

    /// Returns true if no action points are left.
    pub fn is_empty(&self) -> bool {
        self.value <= 0
    }

    /// Returns true if the pool is at its maximum.
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }
}

impl fmt::Display for ActionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

/// Rounds remaining before a talent can be used again.
///
/// Invariant: `remaining <= threshold_rounds`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCooldown")]
pub struct CooldownState {
    /// Rounds the talent is locked after each use. Zero disables the cooldown.
    pub threshold_rounds: u32,
    /// Rounds left until the talent is ready.
    pub remaining: u32,
}

#[derive(Deserialize)]
struct RawCooldown {
    threshold_rounds: u32,
    #[serde(default)]
    remaining: u32,
}

impl From<RawCooldown> for CooldownState {
    fn from(raw: RawCooldown) -> Self {
        Self::new(raw.threshold_rounds, raw.remaining)
    }
}

impl CooldownState {
    /// Create a cooldown, clamping `remaining` to the threshold.
    pub fn new(threshold_rounds: u32, remaining: u32) -> Self {
        Self {
            threshold_rounds,
            remaining: remaining.min(threshold_rounds),
        }
    }

    /// A cooldown that is ready for use.
    pub fn ready(threshold_rounds: u32) -> Self {
        Self::new(threshold_rounds, 0)
    }

    /// Returns true if the talent can be used right now.
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }
}

impl fmt::Display for CooldownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remaining, self.threshold_rounds)
    }
}

/// Hit points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Current hit points.
    pub value: i32,
    /// Maximum hit points. Derived from level and Body for characters.
    pub max: i32,
}

impl Health {
    /// Clamp the current value into `0..=max`.
    pub fn clamp(&mut self) {
        self.value = self.value.clamp(0, self.max.max(0));
    }

    /// Apply damage (negative) or healing (positive), clamped into `0..=max`.
    /// Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.value = self.value.saturating_add(delta);
        self.clamp();
        self.value
    }
}
