//! Terminal card rendering and roster-file persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use wk_core::{Roster, UpdateIntent, ValueKind};
use wk_mechanics::{CardRenderer, ChatCard, DeliveryError, Persistence, RollResult};

/// Prints cards to stdout, as text or JSON.
pub struct TerminalCard {
    pub json: bool,
}

#[async_trait]
impl CardRenderer for TerminalCard {
    async fn render(
        &mut self,
        card: &ChatCard,
        roll: Option<&RollResult>,
    ) -> Result<(), DeliveryError> {
        if self.json {
            let json = serde_json::to_string_pretty(card)
                .map_err(|e| DeliveryError::Render(e.to_string()))?;
            println!("{json}");
            return Ok(());
        }

        let tag = match card.class.as_str() {
            "critical" => " CRITICAL".green().bold().to_string(),
            "fumble" => " FUMBLE".red().bold().to_string(),
            _ => String::new(),
        };
        println!("  {}{tag}", card.label.bold());
        if let Some(roll) = roll {
            println!("  {} {roll}", "roll".dimmed());
        }
        if card.has_description {
            println!("  {}", card.description.italic());
        }
        if card.has_details {
            let mut details = Vec::new();
            if card.has_value {
                let kind = match card.value_type {
                    ValueKind::Damage => "damage",
                    ValueKind::Heal => "heal",
                    ValueKind::None => "value",
                };
                details.push(format!("{kind} {}", card.value));
            }
            if let Some(actions) = card.actions.filter(|_| card.has_actions) {
                details.push(format!("{actions} action(s)"));
            }
            if let Some(category) = card.roll_type.as_deref().filter(|_| card.has_roll_type) {
                details.push(category.to_string());
            }
            println!("  {}", details.join(" | "));
        }
        Ok(())
    }
}

/// Applies intents to the roster file, rewriting it after each one.
pub struct JsonStore {
    path: PathBuf,
    roster: Roster,
}

impl JsonStore {
    /// Start from `roster` as loaded, before the command changes anything.
    pub fn new(path: &Path, roster: Roster) -> Self {
        Self {
            path: path.to_path_buf(),
            roster,
        }
    }
}

#[async_trait]
impl Persistence for JsonStore {
    async fn write(&mut self, intent: &UpdateIntent) -> Result<(), DeliveryError> {
        self.roster
            .apply(intent)
            .map_err(|e| DeliveryError::Write(e.to_string()))?;
        let json = self
            .roster
            .to_json()
            .map_err(|e| DeliveryError::Write(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| DeliveryError::Write(format!("{}: {e}", self.path.display())))?;
        println!("  {} {} = {}", "saved".green(), intent.field, intent.value);
        Ok(())
    }
}

/// Lists intents without writing them.
pub struct PendingStore;

#[async_trait]
impl Persistence for PendingStore {
    async fn write(&mut self, intent: &UpdateIntent) -> Result<(), DeliveryError> {
        println!(
            "  {} {} = {} ({})",
            "pending".yellow(),
            intent.field,
            intent.value,
            intent.target
        );
        Ok(())
    }
}

/// Print actors with their pools and cooldowns.
pub fn print_roster(roster: &Roster) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Kind", "Level", "Health", "Defense", "Actions", "Cooldowns"]);

    for actor in roster.actors() {
        let actions = actor
            .actions
            .map_or_else(|| "-".to_string(), |pool| pool.to_string());
        let cooldowns: Vec<String> = actor
            .talents()
            .filter_map(|t| t.cooldown.map(|c| format!("{} {c}", t.name)))
            .collect();
        let cooldowns = if cooldowns.is_empty() {
            "-".to_string()
        } else {
            cooldowns.join(", ")
        };
        table.add_row(vec![
            actor.name.clone(),
            format!("{:?}", actor.kind).to_lowercase(),
            actor.level.to_string(),
            format!("{}/{}", actor.health.value, actor.health.max),
            actor.defense.to_string(),
            actions,
            cooldowns,
        ]);
    }

    println!("{table}");
}
