//! Derived sheet data.
//!
//! Recomputes the values that follow from an actor's abilities and level.
//! Characters get health, defense, aptitudes and an action pool; NPCs only
//! get their experience award.

use wk_core::{ActionPool, Actor, ActorKind, Aptitudes};

use crate::config::EngineConfig;
use crate::economy::ledger;

/// Base hit points before level scaling.
pub const BASE_HEALTH: i32 = 10;

/// Base defense before abilities and armor.
pub const BASE_DEFENSE: i32 = 10;

/// Defense granted by a shield.
pub const SHIELD_BONUS: i32 = 2;

/// Recompute every derived field of `actor`.
pub fn prepare_derived(actor: &mut Actor, config: &EngineConfig) {
    match actor.kind {
        ActorKind::Character => prepare_character(actor, config),
        ActorKind::Npc => prepare_npc(actor),
    }
}

fn prepare_character(actor: &mut Actor, config: &EngineConfig) {
    let a = &mut actor.abilities;
    for score in [
        &mut a.strength,
        &mut a.agility,
        &mut a.body,
        &mut a.mind,
        &mut a.charisma,
    ] {
        *score = (*score).max(0);
    }

    let level = actor.level;
    let a = actor.abilities.clone();

    actor.health.max = max_health(level, a.body);
    actor.health.clamp();

    let shield = if actor.shield { SHIELD_BONUS } else { 0 };
    actor.defense = saturate(
        i64::from(BASE_DEFENSE)
            + i64::from(third(&[a.body, a.agility, level]))
            + i64::from(actor.armor)
            + i64::from(shield),
    );

    let max = config.max_actions_i32();
    let mut pool = actor.actions.unwrap_or(ActionPool::full(max));
    pool.max = max;
    ledger::clamp(&mut pool);
    actor.actions = Some(pool);

    actor.aptitudes = Aptitudes {
        melee: third(&[a.strength, a.strength, level]),
        ranged: third(&[a.agility, a.agility, level]),
        stealth: third(&[a.agility, a.mind, level]),
        dodge: third(&[a.agility, a.body, level]),
        perception: third(&[a.mind, a.mind, level]),
        knowledge: third(&[a.mind, a.charisma, level]),
        social: third(&[a.charisma, a.charisma, level]),
        magic: third(&[a.mind, a.body, level]),
    };
}

fn prepare_npc(actor: &mut Actor) {
    actor.xp = actor.challenge_rating.saturating_pow(2).saturating_mul(100);
    if let Some(pool) = actor.actions.as_mut() {
        ledger::clamp(pool);
    }
}

/// `10 + 2 * level * body`, counting a non-positive Body as 1.
///
/// Saturates at the bounds of `i32`.
pub fn max_health(level: i32, body: i32) -> i32 {
    let scaled = 2_i64
        .saturating_mul(i64::from(level))
        .saturating_mul(i64::from(body.max(1)));
    saturate(i64::from(BASE_HEALTH).saturating_add(scaled))
}

/// Floor of a third of the summed terms.
fn third(terms: &[i32]) -> i32 {
    let sum: i64 = terms.iter().copied().map(i64::from).sum();
    saturate(sum.div_euclid(3))
}

fn saturate(n: i64) -> i32 {
    i32::try_from(n).unwrap_or(if n < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wk_core::{Abilities, Health};

    fn hero() -> Actor {
        let mut actor = Actor::new(ActorKind::Character, "Mira");
        actor.level = 3;
        actor.abilities = Abilities {
            strength: 4,
            agility: 5,
            body: 2,
            mind: 1,
            charisma: -2,
        };
        actor.armor = 1;
        actor.shield = true;
        actor.health = Health { value: 99, max: 0 };
        actor
    }

    #[test]
    fn character_derived_values() {
        let mut actor = hero();
        prepare_derived(&mut actor, &EngineConfig::default());

        assert_eq!(actor.abilities.charisma, 0);
        assert_eq!(actor.health.max, 22);
        assert_eq!(actor.health.value, 22);
        // 10 + (2 + 5 + 3) / 3 + 1 + 2
        assert_eq!(actor.defense, 16);
        assert_eq!(actor.aptitudes.melee, 3);
        assert_eq!(actor.aptitudes.ranged, 4);
        assert_eq!(actor.aptitudes.stealth, 3);
        assert_eq!(actor.aptitudes.dodge, 3);
        assert_eq!(actor.aptitudes.perception, 1);
        assert_eq!(actor.aptitudes.knowledge, 1);
        assert_eq!(actor.aptitudes.social, 1);
        assert_eq!(actor.aptitudes.magic, 2);
    }

    #[test]
    fn extreme_scores_saturate() {
        let mut actor = hero();
        actor.level = 1_500_000_000;
        actor.abilities.body = 2;
        actor.abilities.strength = i32::MAX;
        actor.armor = i32::MAX;
        prepare_derived(&mut actor, &EngineConfig::default());

        assert_eq!(actor.health.max, i32::MAX);
        assert_eq!(actor.defense, i32::MAX);
        assert_eq!(actor.aptitudes.melee, 1_931_655_764);
        assert_eq!(max_health(i32::MIN, i32::MAX), i32::MIN);
    }

    #[test]
    fn zero_body_counts_as_one() {
        assert_eq!(max_health(4, 0), 18);
        assert_eq!(max_health(4, -3), 18);
        assert_eq!(max_health(0, 5), 10);
    }

    #[test]
    fn pool_created_full_and_clamped() {
        let mut fresh = hero();
        prepare_derived(&mut fresh, &EngineConfig::default());
        assert_eq!(fresh.actions, Some(ActionPool::full(5)));

        let mut over = hero().with_actions(ActionPool { value: 8, max: 8 });
        prepare_derived(&mut over, &EngineConfig::default().with_max_actions(3));
        assert_eq!(over.actions, Some(ActionPool { value: 3, max: 3 }));
    }

    #[test]
    fn npc_xp_from_challenge_rating() {
        let mut goblin = Actor::new(ActorKind::Npc, "Goblin");
        goblin.challenge_rating = 3;
        prepare_derived(&mut goblin, &EngineConfig::default());
        assert_eq!(goblin.xp, 900);
        assert!(goblin.actions.is_none());
    }

    #[test]
    fn prepare_is_stable() {
        let mut actor = hero();
        let config = EngineConfig::default();
        prepare_derived(&mut actor, &config);
        let once = actor.clone();
        prepare_derived(&mut actor, &config);
        assert_eq!(actor, once);
    }
}
