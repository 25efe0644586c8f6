//! Core types for Würfelwerk.
//!
//! Actors, their items, the bounded resources the round engine mutates
//! (action pools, cooldowns, health), and typed update intents that carry
//! proposed changes to an external persistence layer.

/// Ability and aptitude scores.
pub mod ability;
/// Actors and their identifiers.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Typed update intents and the writable field schema.
pub mod intent;
/// Items, talents, and their roll sources.
pub mod item;
/// Bounded resources: action pools, cooldowns, health.
pub mod resource;
/// The ordered collection of actors in play.
pub mod roster;

pub use ability::{Abilities, Ability, Aptitude, Aptitudes};
pub use entity::{Actor, ActorId, ActorKind};
pub use error::{CoreError, CoreResult};
pub use intent::{FieldPath, TargetId, UpdateIntent};
pub use item::{Description, Item, ItemId, ItemKind, RollSource, ValueKind};
pub use resource::{ActionPool, CooldownState, Health};
pub use roster::Roster;
