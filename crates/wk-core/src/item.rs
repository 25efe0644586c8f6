//! Items carried by actors: equipment, talents, and features.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ability::{Ability, Aptitude};
use crate::resource::CooldownState;

/// Unique identifier for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Generate a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// What sort of item this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A physical object with a quantity that can be consumed on use.
    #[default]
    Equipment,
    /// A learned technique. Talents carry a cooldown.
    Talent,
    /// A passive trait or creature feature.
    Feature,
}

impl ItemKind {
    /// Lowercase name used as the card `type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Talent => "talent",
            Self::Feature => "feature",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an item's value represents when it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// The item carries no value.
    #[default]
    None,
    /// Damage dealt to a target.
    Damage,
    /// Hit points restored.
    Heal,
}

impl ValueKind {
    /// Lowercase name used on cards.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Damage => "damage",
            Self::Heal => "heal",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which score an item rolls against, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum RollSource {
    /// The item is used without a roll.
    #[default]
    None,
    /// Roll with an ability score as modifier.
    Ability(Ability),
    /// Roll with an aptitude score as modifier.
    Aptitude(Aptitude),
}

/// Free text attached to an item: a single paragraph or a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    /// One block of text.
    Text(String),
    /// Separate lines, joined with a separator when rendered.
    Lines(Vec<String>),
}

impl Default for Description {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Description {
    /// Render as a single string, joining lines with `separator`.
    pub fn render(&self, separator: &str) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Lines(lines) => lines.join(separator),
        }
    }

    /// Returns true if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Lines(lines) => lines.iter().all(String::is_empty),
        }
    }
}

/// An item owned by an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    #[serde(default)]
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Icon reference.
    #[serde(default)]
    pub img: String,
    /// Item kind.
    #[serde(default)]
    pub kind: ItemKind,
    /// Description shown on the roll card.
    #[serde(default)]
    pub description: Description,
    /// Action points spent when used in a round.
    #[serde(default)]
    pub action_cost: u32,
    /// Base magnitude of the item's effect, if it has one.
    #[serde(default)]
    pub value: Option<i32>,
    /// What the value represents.
    #[serde(default)]
    pub value_kind: ValueKind,
    /// Score rolled against when the item is used.
    #[serde(default)]
    pub roll: RollSource,
    /// Units left (equipment only).
    #[serde(default)]
    pub quantity: u32,
    /// Reuse lock (talents only).
    #[serde(default)]
    pub cooldown: Option<CooldownState>,
}

impl Item {
    /// Create an item with no value, roll, or cooldown.
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            img: String::new(),
            kind,
            description: Description::default(),
            action_cost: 0,
            value: None,
            value_kind: ValueKind::None,
            roll: RollSource::None,
            quantity: 0,
            cooldown: None,
        }
    }

    /// Create a talent with a cooldown of `threshold_rounds`.
    pub fn talent(name: impl Into<String>, threshold_rounds: u32) -> Self {
        Self {
            cooldown: Some(CooldownState::ready(threshold_rounds)),
            ..Self::new(ItemKind::Talent, name)
        }
    }

    /// Set the roll source.
    pub fn with_roll(mut self, roll: RollSource) -> Self {
        self.roll = roll;
        self
    }

    /// Set the base value and its kind.
    pub fn with_value(mut self, kind: ValueKind, value: i32) -> Self {
        self.value_kind = kind;
        self.value = Some(value);
        self
    }

    /// Set the action cost.
    pub fn with_action_cost(mut self, cost: u32) -> Self {
        self.action_cost = cost;
        self
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: Description) -> Self {
        self.description = description;
        self
    }

    /// Returns true if this item carries a cooldown.
    pub fn is_talent(&self) -> bool {
        self.kind == ItemKind::Talent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_render() {
        let d = Description::Lines(vec!["Hits hard.".into(), "Twice.".into()]);
        assert_eq!(d.render("<br>"), "Hits hard.<br>Twice.");
        assert!(!d.is_empty());
        assert!(Description::default().is_empty());
        assert!(Description::Lines(vec![]).is_empty());
    }

    #[test]
    fn talent_starts_ready() {
        let t = Item::talent("Whirlwind", 3);
        assert!(t.is_talent());
        assert_eq!(t.cooldown, Some(CooldownState::ready(3)));
    }

    #[test]
    fn item_document_defaults() {
        let item: Item = serde_json::from_str(
            r#"{"name": "Potion", "quantity": 2, "value": 4, "value_kind": "heal"}"#,
        )
        .unwrap();
        assert_eq!(item.kind, ItemKind::Equipment);
        assert_eq!(item.value, Some(4));
        assert_eq!(item.roll, RollSource::None);
        assert!(item.cooldown.is_none());
    }

    #[test]
    fn roll_source_document() {
        let item: Item = serde_json::from_str(
            r#"{"name": "Sword", "roll": {"type": "aptitude", "key": "melee"}}"#,
        )
        .unwrap();
        assert_eq!(item.roll, RollSource::Aptitude(Aptitude::Melee));
    }
}
