//! Initiative rolls and turn order.

use rand::Rng;
use wk_core::{Ability, Actor, ActorId, Roster};

use crate::config::EngineConfig;
use crate::dice::{Formula, FormulaBuilder};
use crate::error::MechResult;

/// One actor's place in the turn order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiativeEntry {
    /// The actor.
    pub actor: ActorId,
    /// Display name.
    pub name: String,
    /// Initiative total (higher goes first).
    pub score: i32,
}

/// The initiative formula for an actor: initiative dice plus Agility.
pub fn initiative_formula(actor: &Actor, config: &EngineConfig) -> String {
    FormulaBuilder::new(config.initiative_dice.as_str())
        .modifier(actor.ability(Ability::Agility))
        .build()
}

/// Roll initiative for one actor.
pub fn roll_initiative<R: Rng + ?Sized>(
    actor: &Actor,
    config: &EngineConfig,
    rng: &mut R,
) -> MechResult<i32> {
    let formula = Formula::parse(&initiative_formula(actor, config))?;
    Ok(formula.evaluate(rng).total())
}

/// Roll for every actor and sort by score, descending. Ties keep roster order.
pub fn initiative_order<R: Rng + ?Sized>(
    roster: &Roster,
    config: &EngineConfig,
    rng: &mut R,
) -> MechResult<Vec<InitiativeEntry>> {
    let mut entries = roster
        .actors()
        .iter()
        .map(|actor| {
            Ok(InitiativeEntry {
                actor: actor.id,
                name: actor.name.clone(),
                score: roll_initiative(actor, config, rng)?,
            })
        })
        .collect::<MechResult<Vec<_>>>()?;
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(entries)
}
