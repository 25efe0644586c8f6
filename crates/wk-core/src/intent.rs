//! Typed update intents.
//!
//! The engine never writes to storage. It proposes `{target, field, value}`
//! records that an external collaborator performs. Field paths are checked
//! against a fixed schema before an intent can be built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::ActorId;
use crate::error::{CoreError, CoreResult};
use crate::item::ItemId;

/// The entity an intent writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetId {
    /// An actor document.
    Actor(ActorId),
    /// An item embedded in an actor.
    Item {
        /// Owning actor.
        actor: ActorId,
        /// The item.
        item: ItemId,
    },
}

impl TargetId {
    /// The actor owning the target.
    pub fn actor(&self) -> ActorId {
        match self {
            Self::Actor(id) => *id,
            Self::Item { actor, .. } => *actor,
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Actor(_) => "an actor",
            Self::Item { .. } => "an item",
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor(id) => write!(f, "actor {id}"),
            Self::Item { actor, item } => write!(f, "item {item} of actor {actor}"),
        }
    }
}

/// A writable field in the update schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldPath {
    /// `attributes.actions.value` on an actor.
    ActionsValue,
    /// `health.value` on an actor.
    HealthValue,
    /// `cooldown.remaining` on an item.
    CooldownRemaining,
    /// `quantity` on an item.
    Quantity,
}

impl FieldPath {
    /// The dotted key path written by the persistence layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActionsValue => "attributes.actions.value",
            Self::HealthValue => "health.value",
            Self::CooldownRemaining => "cooldown.remaining",
            Self::Quantity => "quantity",
        }
    }

    /// Returns true if the field lives on items rather than actors.
    pub fn is_item_field(self) -> bool {
        matches!(self, Self::CooldownRemaining | Self::Quantity)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldPath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attributes.actions.value" => Ok(Self::ActionsValue),
            "health.value" => Ok(Self::HealthValue),
            "cooldown.remaining" => Ok(Self::CooldownRemaining),
            "quantity" => Ok(Self::Quantity),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

impl TryFrom<String> for FieldPath {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(field: FieldPath) -> Self {
        field.as_str().to_string()
    }
}

/// A proposed write of `value` into `field` of `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateIntent {
    /// Entity to write.
    pub target: TargetId,
    /// Field to write.
    pub field: FieldPath,
    /// New value.
    pub value: i64,
}

impl UpdateIntent {
    /// Build a validated intent.
    pub fn new(target: TargetId, field: FieldPath, value: i64) -> CoreResult<Self> {
        let intent = Self {
            target,
            field,
            value,
        };
        intent.validate()?;
        Ok(intent)
    }

    /// Intent for an actor field.
    pub fn actor(actor: ActorId, field: FieldPath, value: i64) -> CoreResult<Self> {
        Self::new(TargetId::Actor(actor), field, value)
    }

    /// Intent for an item field.
    pub fn item(actor: ActorId, item: ItemId, field: FieldPath, value: i64) -> CoreResult<Self> {
        Self::new(TargetId::Item { actor, item }, field, value)
    }

    /// Check that the field belongs to the target kind and the value is in range.
    pub fn validate(&self) -> CoreResult<()> {
        let item_target = matches!(self.target, TargetId::Item { .. });
        if self.field.is_item_field() != item_target {
            return Err(CoreError::FieldTargetMismatch {
                field: self.field.to_string(),
                target: self.target.kind_name(),
            });
        }
        match self.field {
            FieldPath::CooldownRemaining | FieldPath::Quantity => {
                u32::try_from(self.value).map(|_| ()).map_err(|_| {
                    CoreError::Validation(format!("{} must be non-negative", self.field))
                })
            }
            FieldPath::ActionsValue | FieldPath::HealthValue => i32::try_from(self.value)
                .map(|_| ())
                .map_err(|_| CoreError::Validation(format!("{} out of range", self.field))),
        }
    }
}

impl fmt::Display for UpdateIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {}", self.target, self.field, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_path_round_trip_text() {
        for field in [
            FieldPath::ActionsValue,
            FieldPath::HealthValue,
            FieldPath::CooldownRemaining,
            FieldPath::Quantity,
        ] {
            assert_eq!(field.as_str().parse::<FieldPath>().unwrap(), field);
        }
        assert!(matches!(
            "system.attributes.hp".parse::<FieldPath>(),
            Err(CoreError::UnknownField(_))
        ));
    }

    #[test]
    fn rejects_field_on_wrong_target() {
        let actor = ActorId::new();
        let err = UpdateIntent::actor(actor, FieldPath::CooldownRemaining, 0).unwrap_err();
        assert!(matches!(err, CoreError::FieldTargetMismatch { .. }));

        let err = UpdateIntent::item(actor, ItemId::new(), FieldPath::ActionsValue, 3).unwrap_err();
        assert!(matches!(err, CoreError::FieldTargetMismatch { .. }));
    }

    #[test]
    fn rejects_negative_quantity() {
        let err =
            UpdateIntent::item(ActorId::new(), ItemId::new(), FieldPath::Quantity, -1).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn serializes_field_as_path() {
        let intent = UpdateIntent::actor(ActorId::new(), FieldPath::ActionsValue, 5).unwrap();
        let json = serde_json::to_value(intent).unwrap();
        assert_eq!(json["field"], "attributes.actions.value");
        assert_eq!(json["value"], 5);

        let bad = r#"{"target": {"actor": "6f1c1f8e-3b0a-4d7e-9a53-0d6c5f2b9a11"}, "field": "attributes.xp", "value": 1}"#;
        assert!(serde_json::from_str::<UpdateIntent>(bad).is_err());
    }
}
