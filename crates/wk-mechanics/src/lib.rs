//! Dice resolution and round-based action economy for Würfelwerk.
//!
//! Builds and rolls d20 formulas, classifies criticals and fumbles, resolves
//! item effect values, and runs the round state machine that refills action
//! pools and ticks talent cooldowns. All state changes come out as typed
//! update intents for an external persistence layer.

pub mod combat;
pub mod config;
pub mod delivery;
pub mod dice;
pub mod economy;
pub mod error;
pub mod outcome;
pub mod request;
pub mod resolve;
pub mod sheet;
pub mod usage;
pub mod value;

pub use combat::{
    CombatRoundMarker, InitiativeEntry, RoundController, RoundReport, RoundSignal, RoundState,
    SessionRole, Transition,
};
pub use config::{EngineConfig, Setting};
pub use delivery::{CardRenderer, DeliveryReport, Persistence, deliver};
pub use dice::{DicePool, Die, DieResult, Formula, FormulaBuilder, Keep, RollResult};
pub use error::{DeliveryError, MechError, MechResult};
pub use outcome::{Classification, CriticalRange, OutcomeClass, classify};
pub use request::{CheckKind, ItemCheck, RollRequest};
pub use resolve::{ChatCard, RollOutcome, resolve};
pub use sheet::prepare_derived;
pub use usage::{CheckTarget, PreparedUse, UseOptions, compose_check, compose_item_roll, prepare_use};
pub use value::{DisplayFlags, resolve_value};
