//! Round-tracking state machine.
//!
//! A tracked combat session emits round signals; the [`RoundController`]
//! turns them into cooldown and action-pool updates on the roster. Only the
//! controller holding the [`SessionRole::Director`] capability writes
//! anything: observers follow the round number and nothing else.

pub mod initiative;

pub use initiative::{InitiativeEntry, initiative_order, roll_initiative};

use std::fmt;

use serde::{Deserialize, Serialize};
use wk_core::{Actor, Roster, UpdateIntent};

use crate::economy::{cooldown, ledger};
use crate::error::MechResult;

/// Round numbers carried by a round-change signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRoundMarker {
    /// The new round.
    pub round: u32,
    /// The round before the change.
    pub previous_round: u32,
}

/// Input events from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundSignal {
    /// The session moved from one round to another.
    RoundChanged(CombatRoundMarker),
    /// The session was deleted.
    SessionEnded,
}

impl RoundSignal {
    /// Shorthand for a round change.
    pub fn changed(previous_round: u32, round: u32) -> Self {
        Self::RoundChanged(CombatRoundMarker {
            round,
            previous_round,
        })
    }
}

/// Controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundState {
    /// No session is tracking rounds.
    #[default]
    Idle,
    /// A session is at this round.
    Round(u32),
}

impl RoundState {
    /// Returns true while a session is tracking rounds.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Round(_))
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Round(n) => write!(f, "round {n}"),
        }
    }
}

/// Authority of a controller instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionRole {
    /// Runs side effects. Exactly one per session.
    Director,
    /// Tracks state only.
    #[default]
    Observer,
}

/// What a signal did to the round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Not a forward move; nothing happened.
    Ignored,
    /// Every cooldown and every pool was reset.
    FullReset,
    /// Cooldowns ticked down and pools refilled for a new round.
    Advance {
        /// The round entered.
        round: u32,
    },
}

/// Result of handling one signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// The transition taken.
    pub transition: Transition,
    /// Side effects ran (director only).
    pub applied: bool,
    /// Update intents produced, in application order.
    pub intents: Vec<UpdateIntent>,
}

impl RoundReport {
    fn observed(transition: Transition) -> Self {
        Self {
            transition,
            applied: false,
            intents: Vec::new(),
        }
    }
}

/// The round-tracking state machine.
#[derive(Debug, Clone, Default)]
pub struct RoundController {
    state: RoundState,
    role: SessionRole,
}

impl RoundController {
    /// Create an idle controller with the given role.
    pub fn new(role: SessionRole) -> Self {
        Self {
            state: RoundState::Idle,
            role,
        }
    }

    /// An idle controller that runs side effects.
    pub fn director() -> Self {
        Self::new(SessionRole::Director)
    }

    /// An idle controller that only tracks state.
    pub fn observer() -> Self {
        Self::new(SessionRole::Observer)
    }

    /// Current state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// This controller's role.
    pub fn role(&self) -> SessionRole {
        self.role
    }

    /// Returns true while a session is tracking rounds.
    pub fn is_session_active(&self) -> bool {
        self.state.is_active()
    }

    /// Handle a round signal against the roster.
    pub fn handle(&mut self, signal: RoundSignal, roster: &mut Roster) -> MechResult<RoundReport> {
        let transition = match signal {
            RoundSignal::SessionEnded => {
                self.state = RoundState::Idle;
                Transition::FullReset
            }
            RoundSignal::RoundChanged(marker) if marker.round <= marker.previous_round => {
                tracing::warn!(
                    previous = marker.previous_round,
                    round = marker.round,
                    "ignoring non-forward round change"
                );
                return Ok(RoundReport::observed(Transition::Ignored));
            }
            RoundSignal::RoundChanged(marker) => {
                self.state = RoundState::Round(marker.round);
                if marker.round == 1 {
                    Transition::FullReset
                } else {
                    Transition::Advance {
                        round: marker.round,
                    }
                }
            }
        };

        if self.role != SessionRole::Director {
            tracing::debug!(state = %self.state, "observer tracked round signal");
            return Ok(RoundReport::observed(transition));
        }

        let mut intents = Vec::new();
        for actor in roster.actors_mut() {
            match transition {
                Transition::FullReset => intents.extend(full_reset(actor)?),
                Transition::Advance { .. } => intents.extend(advance(actor)?),
                Transition::Ignored => {}
            }
        }
        tracing::info!(
            state = %self.state,
            ?transition,
            actors = roster.len(),
            intents = intents.len(),
            "round transition applied"
        );

        Ok(RoundReport {
            transition,
            applied: true,
            intents,
        })
    }
}

fn full_reset(actor: &mut Actor) -> MechResult<Vec<UpdateIntent>> {
    let mut intents = cooldown::reset_all(actor)?;
    intents.extend(ledger::reset_to_max(actor)?);
    tracing::debug!(actor = %actor.name, "full reset");
    Ok(intents)
}

fn advance(actor: &mut Actor) -> MechResult<Vec<UpdateIntent>> {
    let mut intents = cooldown::decrement_all(actor)?;
    intents.extend(ledger::reset_to_max(actor)?);
    tracing::debug!(actor = %actor.name, "advanced round");
    Ok(intents)
}
