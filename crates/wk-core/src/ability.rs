//! Ability scores and the aptitudes derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the five base ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Raw physical power.
    Strength,
    /// Speed and coordination.
    Agility,
    /// Toughness and endurance.
    Body,
    /// Wits, memory, and willpower.
    Mind,
    /// Presence and persuasion.
    Charisma,
}

impl Ability {
    /// Every ability, in sheet order.
    pub const ALL: [Ability; 5] = [
        Self::Strength,
        Self::Agility,
        Self::Body,
        Self::Mind,
        Self::Charisma,
    ];

    /// Lowercase key used in roll categories and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Agility => "agility",
            Self::Body => "body",
            Self::Mind => "mind",
            Self::Charisma => "charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strength => write!(f, "Strength"),
            Self::Agility => write!(f, "Agility"),
            Self::Body => write!(f, "Body"),
            Self::Mind => write!(f, "Mind"),
            Self::Charisma => write!(f, "Charisma"),
        }
    }
}

impl FromStr for Ability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.key() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown ability: {s}")))
    }
}

/// A skill-like score derived from two abilities and the actor's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aptitude {
    /// Close combat.
    Melee,
    /// Shooting and throwing.
    Ranged,
    /// Moving unseen.
    Stealth,
    /// Avoiding blows.
    Dodge,
    /// Noticing things.
    Perception,
    /// Lore and learning.
    Knowledge,
    /// Dealing with people.
    Social,
    /// Spellcraft.
    Magic,
}

impl Aptitude {
    /// Every aptitude, in sheet order.
    pub const ALL: [Aptitude; 8] = [
        Self::Melee,
        Self::Ranged,
        Self::Stealth,
        Self::Dodge,
        Self::Perception,
        Self::Knowledge,
        Self::Social,
        Self::Magic,
    ];

    /// Lowercase key used in roll categories and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Melee => "melee",
            Self::Ranged => "ranged",
            Self::Stealth => "stealth",
            Self::Dodge => "dodge",
            Self::Perception => "perception",
            Self::Knowledge => "knowledge",
            Self::Social => "social",
            Self::Magic => "magic",
        }
    }
}

impl fmt::Display for Aptitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

impl FromStr for Aptitude {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.key() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown aptitude: {s}")))
    }
}

/// The five ability scores of an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abilities {
    /// Strength score.
    pub strength: i32,
    /// Agility score.
    pub agility: i32,
    /// Body score.
    pub body: i32,
    /// Mind score.
    pub mind: i32,
    /// Charisma score.
    pub charisma: i32,
}

impl Abilities {
    /// Read a score.
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Agility => self.agility,
            Ability::Body => self.body,
            Ability::Mind => self.mind,
            Ability::Charisma => self.charisma,
        }
    }

    /// Mutable access to a score.
    pub fn get_mut(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Strength => &mut self.strength,
            Ability::Agility => &mut self.agility,
            Ability::Body => &mut self.body,
            Ability::Mind => &mut self.mind,
            Ability::Charisma => &mut self.charisma,
        }
    }
}

/// Derived aptitude scores. Recomputed from abilities, never edited directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Aptitudes {
    /// Melee score.
    pub melee: i32,
    /// Ranged score.
    pub ranged: i32,
    /// Stealth score.
    pub stealth: i32,
    /// Dodge score.
    pub dodge: i32,
    /// Perception score.
    pub perception: i32,
    /// Knowledge score.
    pub knowledge: i32,
    /// Social score.
    pub social: i32,
    /// Magic score.
    pub magic: i32,
}

impl Aptitudes {
    /// Read a score.
    pub fn get(&self, aptitude: Aptitude) -> i32 {
        match aptitude {
            Aptitude::Melee => self.melee,
            Aptitude::Ranged => self.ranged,
            Aptitude::Stealth => self.stealth,
            Aptitude::Dodge => self.dodge,
            Aptitude::Perception => self.perception,
            Aptitude::Knowledge => self.knowledge,
            Aptitude::Social => self.social,
            Aptitude::Magic => self.magic,
        }
    }

    /// Mutable access to a score.
    pub fn get_mut(&mut self, aptitude: Aptitude) -> &mut i32 {
        match aptitude {
            Aptitude::Melee => &mut self.melee,
            Aptitude::Ranged => &mut self.ranged,
            Aptitude::Stealth => &mut self.stealth,
            Aptitude::Dodge => &mut self.dodge,
            Aptitude::Perception => &mut self.perception,
            Aptitude::Knowledge => &mut self.knowledge,
            Aptitude::Social => &mut self.social,
            Aptitude::Magic => &mut self.magic,
        }
    }
}
