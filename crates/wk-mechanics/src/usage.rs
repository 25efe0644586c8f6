//! Composing rolls from sheet data and using items.
//!
//! Using an item is two-phase. [`prepare_use`] runs every check against an
//! immutable actor and plans the mutations; [`PreparedUse::commit`] applies
//! them. A rejected use never leaves a partial write behind.

use std::fmt;

use wk_core::{
    Ability, Actor, ActorId, Aptitude, FieldPath, Item, ItemId, ItemKind, RollSource,
    UpdateIntent,
};

use crate::config::EngineConfig;
use crate::dice::FormulaBuilder;
use crate::economy::{cooldown, ledger};
use crate::error::{MechError, MechResult};
use crate::request::{ItemCheck, RollRequest};

/// What a basic check tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckTarget {
    /// An ability score.
    Ability(Ability),
    /// An aptitude score.
    Aptitude(Aptitude),
}

impl CheckTarget {
    /// `"ability"` or `"aptitude"`.
    pub fn kind(self) -> &'static str {
        match self {
            Self::Ability(_) => "ability",
            Self::Aptitude(_) => "aptitude",
        }
    }

    /// Lowercase key of the score.
    pub fn key(self) -> &'static str {
        match self {
            Self::Ability(a) => a.key(),
            Self::Aptitude(a) => a.key(),
        }
    }

    /// The actor's score for this target.
    pub fn score(self, actor: &Actor) -> i32 {
        match self {
            Self::Ability(a) => actor.ability(a),
            Self::Aptitude(a) => actor.aptitude(a),
        }
    }

    fn from_source(source: RollSource) -> Option<Self> {
        match source {
            RollSource::None => None,
            RollSource::Ability(a) => Some(Self::Ability(a)),
            RollSource::Aptitude(a) => Some(Self::Aptitude(a)),
        }
    }
}

impl fmt::Display for CheckTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ability(a) => write!(f, "{a}"),
            Self::Aptitude(a) => write!(f, "{a}"),
        }
    }
}

/// Choices made when using an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UseOptions {
    /// Situational bonus or malus on the roll.
    pub bonus_malus: i32,
    /// Bonus or malus on the effect value.
    pub value_bonus: i32,
    /// Spend one unit of the item. Only equipment has a quantity to spend;
    /// the flag is ignored for talents and features.
    pub consume_item: bool,
    /// Pay the item's action cost.
    pub use_actions: bool,
}

/// Build a basic ability or aptitude check.
pub fn compose_check(
    actor: &Actor,
    target: CheckTarget,
    bonus_malus: i32,
    config: &EngineConfig,
) -> RollRequest {
    let builder = FormulaBuilder::new(config.check_dice.as_str())
        .modifier(target.score(actor))
        .bonus_malus(bonus_malus);
    RollRequest::new(format!("{} tests {target}", actor.name), &builder)
        .with_img(actor.img.as_str())
        .with_critical_range(&config.critical_range)
        .with_entity_kind(target.kind())
}

/// Build the roll for using `item`. Items without a roll source are used
/// without rolling.
pub fn compose_item_roll(
    actor: &Actor,
    item: &Item,
    bonus_malus: i32,
    value_bonus: i32,
    config: &EngineConfig,
) -> RollRequest {
    let target = CheckTarget::from_source(item.roll);
    let mut builder = FormulaBuilder::new(config.check_dice.as_str()).bonus_malus(bonus_malus);
    if let Some(target) = target {
        builder = builder.modifier(target.score(actor));
    }
    let roll_category =
        target.map(|t| format!("{}.{}.{}", config.setting.as_str(), t.kind(), t.key()));

    RollRequest::new(format!("{} uses {}", actor.name, item.name), &builder)
        .with_img(item.img.as_str())
        .with_critical_range(&config.critical_range)
        .with_description(item.description.render(&config.description_separator))
        .with_entity_kind(item.kind.as_str())
        .with_item(ItemCheck {
            no_roll: target.is_none(),
            action_cost: item.action_cost,
            base_value: item.value,
            value_kind: item.value_kind,
            value_bonus,
            roll_category,
        })
}

/// A validated item use, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUse {
    actor: ActorId,
    item: ItemId,
    request: RollRequest,
    consume_item: bool,
    action_cost: Option<u32>,
    start_cooldown: bool,
}

impl PreparedUse {
    /// The roll to resolve.
    pub fn request(&self) -> &RollRequest {
        &self.request
    }

    /// Consume the prepared use, keeping only the roll request.
    pub fn into_request(self) -> RollRequest {
        self.request
    }

    /// Apply the planned mutations to `actor` and return their intents.
    ///
    /// The checks are repeated first, so an actor that changed since
    /// preparation is rejected untouched.
    pub fn commit(&self, actor: &mut Actor) -> MechResult<Vec<UpdateIntent>> {
        if actor.id != self.actor {
            return Err(MechError::Validation(format!(
                "prepared for actor {}, committed on {}",
                self.actor, actor.id
            )));
        }
        let item = actor.item(self.item)?;
        if self.consume_item && item.quantity == 0 {
            return Err(depleted(item));
        }
        if let Some(cost) = self.action_cost {
            ledger::check(actor, cost)?;
        }
        if let Some(state) = item.cooldown.as_ref().filter(|_| self.start_cooldown) {
            cooldown::ensure_ready(state)?;
        }

        let mut intents = Vec::new();
        if self.consume_item {
            let item = actor.item_mut(self.item)?;
            item.quantity -= 1;
            let quantity = item.quantity;
            intents.push(UpdateIntent::item(
                self.actor,
                self.item,
                FieldPath::Quantity,
                i64::from(quantity),
            )?);
        }
        if let Some(cost) = self.action_cost {
            intents.extend(ledger::consume(actor, cost)?);
        }
        if self.start_cooldown {
            let item = actor.item_mut(self.item)?;
            if let Some(state) = item.cooldown.as_mut() {
                if cooldown::activate(state) {
                    let remaining = state.remaining;
                    intents.push(UpdateIntent::item(
                        self.actor,
                        self.item,
                        FieldPath::CooldownRemaining,
                        i64::from(remaining),
                    )?);
                }
            }
        }

        tracing::debug!(actor = %actor.name, intents = intents.len(), "committed item use");
        Ok(intents)
    }
}

fn depleted(item: &Item) -> MechError {
    MechError::Validation(format!("{} is depleted", item.name))
}

/// Validate an item use without mutating anything.
///
/// Checks run in order: quantity, action cost, cooldown. Action costs and
/// cooldowns only apply while a round-tracking session is active.
pub fn prepare_use(
    actor: &Actor,
    item_id: ItemId,
    options: &UseOptions,
    session_active: bool,
    config: &EngineConfig,
) -> MechResult<PreparedUse> {
    let item = actor.item(item_id)?;

    let consume_item = options.consume_item && item.kind == ItemKind::Equipment;
    if consume_item && item.quantity == 0 {
        return Err(depleted(item));
    }

    let action_cost =
        (options.use_actions && session_active && item.action_cost > 0).then_some(item.action_cost);
    if let Some(cost) = action_cost {
        ledger::check(actor, cost)?;
    }

    let cooling = item
        .cooldown
        .filter(|c| item.is_talent() && c.threshold_rounds > 0 && session_active);
    if let Some(state) = cooling {
        cooldown::ensure_ready(&state)?;
    }

    let request = compose_item_roll(
        actor,
        item,
        options.bonus_malus,
        options.value_bonus,
        config,
    );
    Ok(PreparedUse {
        actor: actor.id,
        item: item_id,
        request,
        consume_item,
        action_cost,
        start_cooldown: cooling.is_some(),
    })
}

/// Spend one action on movement. Only meaningful during a tracked session.
pub fn spend_movement(actor: &mut Actor, session_active: bool) -> MechResult<UpdateIntent> {
    if !session_active {
        return Err(MechError::Validation(
            "movement costs actions only during a tracked session".into(),
        ));
    }
    ledger::consume(actor, 1)?
        .ok_or_else(|| MechError::Validation(format!("{} has no action pool", actor.name)))
}

/// Refill the actor's action pool by hand.
pub fn reset_actions(actor: &mut Actor) -> MechResult<Option<UpdateIntent>> {
    let intent = ledger::reset_to_max(actor)?;
    if intent.is_some() {
        tracing::info!(actor = %actor.name, "actions reset");
    }
    Ok(intent)
}

/// Apply damage (negative `delta`) or healing to the actor's hit points.
pub fn adjust_health(actor: &mut Actor, delta: i32) -> MechResult<UpdateIntent> {
    let value = actor.health.adjust(delta);
    tracing::debug!(actor = %actor.name, delta, value, "health adjusted");
    Ok(UpdateIntent::actor(
        actor.id,
        FieldPath::HealthValue,
        i64::from(value),
    )?)
}

/// Change an item's quantity by `delta`, stopping at zero.
pub fn adjust_quantity(actor: &mut Actor, item_id: ItemId, delta: i32) -> MechResult<UpdateIntent> {
    let actor_id = actor.id;
    let item = actor.item_mut(item_id)?;
    item.quantity = item.quantity.saturating_add_signed(delta);
    Ok(UpdateIntent::item(
        actor_id,
        item_id,
        FieldPath::Quantity,
        i64::from(item.quantity),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Setting;
    use wk_core::{ActionPool, ActorKind, CooldownState, Description, ItemKind, ValueKind};

    fn mira() -> Actor {
        let mut actor =
            Actor::new(ActorKind::Character, "Mira").with_actions(ActionPool::new(3, 5));
        actor.abilities.mind = 4;
        actor.aptitudes.melee = 2;
        actor
    }

    fn sword() -> Item {
        Item::new(ItemKind::Equipment, "Sword")
            .with_roll(RollSource::Aptitude(Aptitude::Melee))
            .with_value(ValueKind::Damage, 6)
            .with_action_cost(2)
    }

    #[test]
    fn basic_check_request() {
        let actor = mira();
        let request = compose_check(
            &actor,
            CheckTarget::Ability(Ability::Mind),
            -1,
            &EngineConfig::default(),
        );
        assert_eq!(request.label, "Mira tests Mind");
        assert_eq!(request.formula(), "1d20 +4 -1");
        assert_eq!(request.entity_kind, "ability");
        assert!(request.item().is_none());
    }

    #[test]
    fn item_roll_request() {
        let actor = mira();
        let config = EngineConfig::default().with_setting(Setting::StarWars);
        let item = sword().with_description(Description::Lines(vec!["Sharp".into(), "Old".into()]));
        let request = compose_item_roll(&actor, &item, 0, 1, &config);

        assert_eq!(request.label, "Mira uses Sword");
        assert_eq!(request.formula(), "1d20 +2");
        assert_eq!(request.description, "Sharp<br>Old");
        assert_eq!(request.entity_kind, "equipment");
        let check = request.item().unwrap();
        assert!(!check.no_roll);
        assert_eq!(check.base_value, Some(6));
        assert_eq!(check.value_bonus, 1);
        assert_eq!(check.roll_category.as_deref(), Some("star_wars.aptitude.melee"));
    }

    #[test]
    fn item_without_roll_source() {
        let potion = Item::new(ItemKind::Equipment, "Potion").with_value(ValueKind::Heal, 5);
        let request = compose_item_roll(&mira(), &potion, 3, 0, &EngineConfig::default());
        assert!(request.no_roll());
        assert_eq!(request.item().unwrap().roll_category, None);
    }

    #[test]
    fn depleted_item_is_rejected_untouched() {
        let mut actor = mira();
        let id = actor.add_item(sword().with_quantity(0));
        let before = actor.clone();
        let options = UseOptions {
            consume_item: true,
            use_actions: true,
            ..UseOptions::default()
        };
        let err = prepare_use(&actor, id, &options, true, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, MechError::Validation(_)));
        assert_eq!(actor, before);
    }

    #[test]
    fn insufficient_actions() {
        let mut actor = mira().with_actions(ActionPool::new(1, 5));
        let id = actor.add_item(sword());
        let options = UseOptions {
            use_actions: true,
            ..UseOptions::default()
        };
        let err = prepare_use(&actor, id, &options, true, &EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            MechError::InsufficientResource {
                required: 2,
                available: 1
            }
        ));
        // outside a session the cost is not charged
        assert!(prepare_use(&actor, id, &options, false, &EngineConfig::default()).is_ok());
    }

    #[test]
    fn talent_on_cooldown() {
        let mut actor = mira();
        let mut fireball = Item::talent("Fireball", 3).with_roll(RollSource::Ability(Ability::Mind));
        fireball.cooldown = Some(CooldownState::new(3, 2));
        let id = actor.add_item(fireball);

        let err = prepare_use(&actor, id, &UseOptions::default(), true, &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, MechError::OnCooldown { remaining: 2 }));
        assert!(prepare_use(&actor, id, &UseOptions::default(), false, &EngineConfig::default())
            .is_ok());
    }

    #[test]
    fn commit_applies_all_mutations() {
        let mut actor = mira();
        let sword_id = actor.add_item(sword().with_quantity(2));
        let options = UseOptions {
            consume_item: true,
            use_actions: true,
            ..UseOptions::default()
        };
        let prepared =
            prepare_use(&actor, sword_id, &options, true, &EngineConfig::default()).unwrap();
        let intents = prepared.commit(&mut actor).unwrap();

        assert_eq!(actor.item(sword_id).unwrap().quantity, 1);
        assert_eq!(actor.actions.unwrap().value, 1);
        let fields: Vec<_> = intents.iter().map(|i| i.field).collect();
        assert_eq!(fields, [FieldPath::Quantity, FieldPath::ActionsValue]);
    }

    #[test]
    fn commit_starts_cooldown() {
        let mut actor = mira();
        let id = actor.add_item(Item::talent("Fireball", 3));
        let prepared =
            prepare_use(&actor, id, &UseOptions::default(), true, &EngineConfig::default())
                .unwrap();
        let intents = prepared.commit(&mut actor).unwrap();
        assert_eq!(actor.item(id).unwrap().cooldown.unwrap().remaining, 3);
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].value, 3);

        let again = prepare_use(&actor, id, &UseOptions::default(), true, &EngineConfig::default());
        assert!(matches!(again, Err(MechError::OnCooldown { remaining: 3 })));
    }

    #[test]
    fn commit_rejects_stale_state() {
        let mut actor = mira();
        let id = actor.add_item(sword());
        let options = UseOptions {
            use_actions: true,
            ..UseOptions::default()
        };
        let prepared = prepare_use(&actor, id, &options, true, &EngineConfig::default()).unwrap();
        actor.actions = Some(ActionPool::new(0, 5));
        let before = actor.clone();
        assert!(prepared.commit(&mut actor).is_err());
        assert_eq!(actor, before);

        let mut other = mira();
        assert!(matches!(
            prepared.commit(&mut other),
            Err(MechError::Validation(_))
        ));
    }

    #[test]
    fn commit_rejects_talent_cooled_down_since_prepare() {
        let mut actor = mira();
        let id = actor.add_item(Item::talent("Fireball", 3));
        let prepared =
            prepare_use(&actor, id, &UseOptions::default(), true, &EngineConfig::default())
                .unwrap();
        actor.item_mut(id).unwrap().cooldown = Some(CooldownState::new(3, 2));
        let before = actor.clone();

        let err = prepared.commit(&mut actor).unwrap_err();
        assert!(matches!(err, MechError::OnCooldown { remaining: 2 }));
        assert_eq!(actor, before);
    }

    #[test]
    fn consume_flag_only_spends_equipment() {
        let mut actor = mira();
        let mut fireball = Item::talent("Fireball", 0);
        fireball.quantity = 0;
        let id = actor.add_item(fireball);
        let options = UseOptions {
            consume_item: true,
            ..UseOptions::default()
        };
        let prepared = prepare_use(&actor, id, &options, true, &EngineConfig::default()).unwrap();
        let intents = prepared.commit(&mut actor).unwrap();
        assert!(intents.iter().all(|i| i.field != FieldPath::Quantity));
        assert_eq!(actor.item(id).unwrap().quantity, 0);
    }

    #[test]
    fn movement_needs_session_and_actions() {
        let mut actor = mira().with_actions(ActionPool::new(1, 5));
        assert!(matches!(
            spend_movement(&mut actor, false),
            Err(MechError::Validation(_))
        ));
        let intent = spend_movement(&mut actor, true).unwrap();
        assert_eq!(intent.value, 0);
        assert!(matches!(
            spend_movement(&mut actor, true),
            Err(MechError::InsufficientResource { .. })
        ));
        assert_eq!(actor.actions.unwrap().value, 0);
    }

    #[test]
    fn manual_reset() {
        let mut actor = mira();
        let intent = reset_actions(&mut actor).unwrap().unwrap();
        assert_eq!(intent.value, 5);
        assert!(reset_actions(&mut Actor::new(ActorKind::Npc, "Goblin")).unwrap().is_none());
    }

    #[test]
    fn health_changes_emit_intents() {
        let mut actor = mira();
        actor.health = wk_core::Health { value: 10, max: 22 };
        let hit = adjust_health(&mut actor, -4).unwrap();
        assert_eq!(hit.field, FieldPath::HealthValue);
        assert_eq!(hit.value, 6);
        assert_eq!(adjust_health(&mut actor, 50).unwrap().value, 22);
        assert_eq!(adjust_health(&mut actor, -99).unwrap().value, 0);
        assert_eq!(actor.health.value, 0);
    }

    #[test]
    fn quantity_stops_at_zero() {
        let mut actor = mira();
        let id = actor.add_item(sword().with_quantity(1));
        assert_eq!(adjust_quantity(&mut actor, id, 2).unwrap().value, 3);
        assert_eq!(adjust_quantity(&mut actor, id, -5).unwrap().value, 0);
    }
}
