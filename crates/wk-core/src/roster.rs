//! The roster: the explicit set of actors a round or roll operates on.

use serde::{Deserialize, Serialize};

use crate::entity::{Actor, ActorId};
use crate::error::{CoreError, CoreResult};
use crate::intent::{FieldPath, TargetId, UpdateIntent};

/// An ordered collection of actors.
///
/// Order is significant: round fan-out visits actors in roster order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    actors: Vec<Actor>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a roster document.
    pub fn from_json(source: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serialize the roster as pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add an actor. Returns its id.
    pub fn add(&mut self, actor: Actor) -> ActorId {
        let id = actor.id;
        self.actors.push(actor);
        id
    }

    /// All actors, in roster order.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Mutable access to all actors, in roster order.
    pub fn actors_mut(&mut self) -> &mut [Actor] {
        &mut self.actors
    }

    /// Number of actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns true if the roster has no actors.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Look up an actor by id.
    pub fn get(&self, id: ActorId) -> CoreResult<&Actor> {
        self.actors
            .iter()
            .find(|a| a.id == id)
            .ok_or(CoreError::ActorNotFound(id))
    }

    /// Mutable lookup of an actor by id.
    pub fn get_mut(&mut self, id: ActorId) -> CoreResult<&mut Actor> {
        self.actors
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(CoreError::ActorNotFound(id))
    }

    /// Find an actor by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Actor> {
        self.actors
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Write an intent into the roster.
    ///
    /// Values are stored as given; bounds are restored the next time derived
    /// data is recomputed.
    pub fn apply(&mut self, intent: &UpdateIntent) -> CoreResult<()> {
        intent.validate()?;
        let actor = self.get_mut(intent.target.actor())?;
        // `validate` guarantees the value fits the field's type.
        let narrow = |v: i64| i32::try_from(v).unwrap_or_default();
        let unsigned = |v: i64| u32::try_from(v).unwrap_or_default();

        match (intent.target, intent.field) {
            (TargetId::Actor(_), FieldPath::ActionsValue) => {
                let pool = actor.actions.as_mut().ok_or_else(|| {
                    CoreError::Validation(format!("{} has no action pool", actor.name))
                })?;
                pool.value = narrow(intent.value);
            }
            (TargetId::Actor(_), FieldPath::HealthValue) => {
                actor.health.value = narrow(intent.value);
            }
            (TargetId::Item { item, .. }, FieldPath::CooldownRemaining) => {
                let item = actor.item_mut(item)?;
                let cooldown = item.cooldown.as_mut().ok_or_else(|| {
                    CoreError::Validation(format!("{} has no cooldown", item.name))
                })?;
                cooldown.remaining = unsigned(intent.value);
            }
            (TargetId::Item { item, .. }, FieldPath::Quantity) => {
                actor.item_mut(item)?.quantity = unsigned(intent.value);
            }
            (target, field) => {
                return Err(CoreError::FieldTargetMismatch {
                    field: field.to_string(),
                    target: target.kind_name(),
                });
            }
        }
        Ok(())
    }
}
