//! Actors: player characters and NPCs.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ability::{Abilities, Ability, Aptitude, Aptitudes};
use crate::error::{CoreError, CoreResult};
use crate::item::{Item, ItemId};
use crate::resource::{ActionPool, Health};

/// Unique identifier for an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generate a new random actor ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The kind of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// A player character with the full action economy.
    #[default]
    Character,
    /// A non-player character.
    Npc,
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Npc => write!(f, "npc"),
        }
    }
}

/// A character or NPC with scores, resources, and items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier.
    #[serde(default)]
    pub id: ActorId,
    /// Display name.
    pub name: String,
    /// Portrait reference.
    #[serde(default)]
    pub img: String,
    /// Actor kind.
    #[serde(default)]
    pub kind: ActorKind,
    /// Base ability scores.
    #[serde(default)]
    pub abilities: Abilities,
    /// Derived aptitude scores.
    #[serde(default)]
    pub aptitudes: Aptitudes,
    /// Character level.
    #[serde(default)]
    pub level: i32,
    /// Armor bonus to defense.
    #[serde(default)]
    pub armor: i32,
    /// Whether a shield is carried.
    #[serde(default)]
    pub shield: bool,
    /// Derived defense score.
    #[serde(default)]
    pub defense: i32,
    /// Hit points.
    #[serde(default)]
    pub health: Health,
    /// Action points. `None` for actors without an action economy.
    #[serde(default)]
    pub actions: Option<ActionPool>,
    /// Challenge rating (NPCs).
    #[serde(default)]
    pub challenge_rating: u32,
    /// Experience awarded for defeating this actor (NPCs).
    #[serde(default)]
    pub xp: u32,
    /// Owned items, in sheet order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Actor {
    /// Create an actor with zeroed scores and no items.
    pub fn new(kind: ActorKind, name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            img: String::new(),
            kind,
            abilities: Abilities::default(),
            aptitudes: Aptitudes::default(),
            level: 0,
            armor: 0,
            shield: false,
            defense: 0,
            health: Health::default(),
            actions: None,
            challenge_rating: 0,
            xp: 0,
            items: Vec::new(),
        }
    }

    /// Give the actor an action pool.
    pub fn with_actions(mut self, pool: ActionPool) -> Self {
        self.actions = Some(pool);
        self
    }

    /// Add an item. Returns its id.
    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Look up an item by id.
    pub fn item(&self, id: ItemId) -> CoreResult<&Item> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotFound(id))
    }

    /// Mutable lookup of an item by id.
    pub fn item_mut(&mut self, id: ItemId) -> CoreResult<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotFound(id))
    }

    /// Find an item by name (case-insensitive).
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Iterate over the actor's talents.
    pub fn talents(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_talent())
    }

    /// Ability score.
    pub fn ability(&self, ability: Ability) -> i32 {
        self.abilities.get(ability)
    }

    /// Aptitude score.
    pub fn aptitude(&self, aptitude: Aptitude) -> i32 {
        self.aptitudes.get(aptitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    #[test]
    fn item_lookup() {
        let mut actor = Actor::new(ActorKind::Character, "Mira");
        let id = actor.add_item(Item::new(ItemKind::Equipment, "Rope"));
        assert_eq!(actor.item(id).unwrap().name, "Rope");
        assert!(actor.find_item("rope").is_some());
        assert!(actor.item(ItemId::new()).is_err());
    }

    #[test]
    fn talents_filter() {
        let mut actor = Actor::new(ActorKind::Npc, "Goblin");
        actor.add_item(Item::new(ItemKind::Feature, "Sneaky"));
        actor.add_item(Item::talent("Stab", 2));
        let names: Vec<_> = actor.talents().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Stab"]);
    }

    #[test]
    fn actor_document_without_ids() {
        let actor: Actor = serde_json::from_str(
            r#"{"name": "Mira", "actions": {"max": 5}, "abilities": {"agility": 3}}"#,
        )
        .unwrap();
        assert_eq!(actor.kind, ActorKind::Character);
        assert_eq!(actor.actions, Some(ActionPool::full(5)));
        assert_eq!(actor.ability(Ability::Agility), 3);
    }

    #[test]
    fn display() {
        assert_eq!(ActorKind::Npc.to_string(), "npc");
        assert_eq!(ActorId::new().to_string().len(), 8);
    }
}
