//! Roll resolution: formula → dice → classification → value.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wk_core::{Actor, ValueKind};

use crate::dice::{Formula, RollResult};
use crate::error::MechResult;
use crate::outcome::{Classification, OutcomeClass, classify};
use crate::request::{CheckKind, RollRequest};
use crate::value::{DisplayFlags, resolve_value};

/// The classified, value-bearing result of a roll request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// The dice rolled, or `None` for an item used without a roll.
    pub roll: Option<RollResult>,
    /// The kept result is a critical.
    pub is_critical: bool,
    /// The kept result is a fumble.
    pub is_fumble: bool,
    /// Tri-state class.
    pub outcome_class: OutcomeClass,
    /// Resolved effect value (0 for basic checks).
    pub final_value: i32,
    /// Card display flags.
    pub flags: DisplayFlags,
}

impl RollOutcome {
    /// The kept die result.
    pub fn kept_result(&self) -> Option<u32> {
        self.roll.as_ref().and_then(RollResult::kept)
    }

    /// Every die result.
    pub fn all_results(&self) -> Vec<u32> {
        self.roll
            .as_ref()
            .map(RollResult::all_results)
            .unwrap_or_default()
    }

    /// Formula total (kept dice plus modifiers).
    pub fn total(&self) -> Option<i32> {
        self.roll.as_ref().map(RollResult::total)
    }

    /// Build the card payload for the rendering collaborator.
    pub fn card(&self, request: &RollRequest, actor: &Actor) -> ChatCard {
        let item = request.item();
        ChatCard {
            kind: request.entity_kind.clone(),
            label: request.label.clone(),
            img: request.img.clone(),
            class: self.outcome_class.css_class().to_string(),
            is_critical: self.is_critical,
            is_fumble: self.is_fumble,
            has_description: !request.description.is_empty(),
            description: request.description.clone(),
            actor_name: actor.name.clone(),
            actor_img: actor.img.clone(),
            has_value: self.flags.has_value,
            has_actions: self.flags.has_actions,
            has_roll_type: self.flags.has_roll_category,
            has_details: self.flags.has_details,
            actions: item.map(|i| i.action_cost),
            value: self.final_value,
            value_type: item.map(|i| i.value_kind).unwrap_or_default(),
            roll_type: item.and_then(|i| i.roll_category.clone()),
        }
    }
}

/// The flat payload handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatCard {
    /// Entity kind that triggered the roll.
    #[serde(rename = "type")]
    pub kind: String,
    /// Card title.
    pub label: String,
    /// Icon reference.
    pub img: String,
    /// `"critical"`, `"fumble"`, or empty.
    pub class: String,
    /// Critical flag.
    pub is_critical: bool,
    /// Fumble flag.
    pub is_fumble: bool,
    /// A description is present.
    pub has_description: bool,
    /// Description text.
    pub description: String,
    /// Rolling actor's name.
    pub actor_name: String,
    /// Rolling actor's portrait.
    pub actor_img: String,
    /// The value is shown.
    pub has_value: bool,
    /// The action cost is shown.
    pub has_actions: bool,
    /// The roll category is shown.
    pub has_roll_type: bool,
    /// Any detail section is shown.
    pub has_details: bool,
    /// Action cost (item checks).
    pub actions: Option<u32>,
    /// Resolved value.
    pub value: i32,
    /// What the value represents.
    pub value_type: ValueKind,
    /// Roll category key.
    pub roll_type: Option<String>,
}

/// Resolve a request into an outcome.
///
/// Fails with [`crate::MechError::Formula`] before anything is classified if
/// the formula is malformed.
pub fn resolve<R: Rng + ?Sized>(request: &RollRequest, rng: &mut R) -> MechResult<RollOutcome> {
    let roll = if request.no_roll() {
        None
    } else {
        Some(Formula::parse(request.formula())?.evaluate(rng))
    };

    let classification = roll
        .as_ref()
        .and_then(RollResult::kept)
        .map(|kept| classify(kept, &request.critical_range))
        .unwrap_or_default();
    let class = classification.class();

    let (final_value, flags) = match &request.kind {
        CheckKind::Basic => (0, DisplayFlags::default()),
        CheckKind::Item(check) => {
            let value = check
                .base_value
                .map(|base| resolve_value(base, check.value_bonus, class))
                .unwrap_or(0);
            let flags = DisplayFlags::new(
                check.value_kind,
                value,
                Some(check.action_cost),
                check.roll_category.as_deref(),
            );
            (value, flags)
        }
    };

    let Classification {
        is_critical,
        is_fumble,
    } = classification;
    tracing::debug!(
        label = %request.label,
        kept = ?roll.as_ref().and_then(RollResult::kept),
        class = %class,
        value = final_value,
        "resolved roll"
    );

    Ok(RollOutcome {
        roll,
        is_critical,
        is_fumble,
        outcome_class: class,
        final_value,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MechError;
    use crate::dice::FormulaBuilder;
    use crate::request::ItemCheck;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wk_core::ActorKind;

    fn damage_request(formula: &str) -> RollRequest {
        RollRequest::new("Mira uses Sword", &FormulaBuilder::new(formula))
            .with_entity_kind("equipment")
            .with_item(ItemCheck {
                action_cost: 2,
                base_value: Some(10),
                value_kind: ValueKind::Damage,
                value_bonus: 2,
                roll_category: Some("fantasy.aptitude.melee".into()),
                ..ItemCheck::default()
            })
    }

    #[test]
    fn value_follows_classification() {
        let request = damage_request("1d20");
        for seed in 0..200 {
            let outcome = resolve(&request, &mut StdRng::seed_from_u64(seed)).unwrap();
            let kept = outcome.kept_result().unwrap();
            let expected = match kept {
                1 => 0,
                20 => 24,
                _ => 12,
            };
            assert_eq!(outcome.final_value, expected, "kept {kept}");
            assert_eq!(outcome.is_fumble, kept == 1);
            assert_eq!(outcome.is_critical, kept == 20);
        }
    }

    #[test]
    fn keep_highest_classifies_on_kept_die_only() {
        let request = damage_request("2d20kh");
        let mut discarded_one = false;
        for seed in 0..300 {
            let outcome = resolve(&request, &mut StdRng::seed_from_u64(seed)).unwrap();
            let all = outcome.all_results();
            assert_eq!(all.len(), 2);
            let kept = outcome.kept_result().unwrap();
            assert_eq!(kept, *all.iter().max().unwrap());
            assert_eq!(outcome.is_fumble, kept == 1);
            assert_eq!(outcome.is_critical, kept == 20);
            if all.contains(&1) && kept != 1 {
                discarded_one = true;
                assert_ne!(outcome.outcome_class, OutcomeClass::Fumble);
                assert_ne!(outcome.final_value, 0);
            }
        }
        assert!(discarded_one);
    }

    #[test]
    fn no_roll_item_keeps_base_value() {
        let request = RollRequest::new("Mira uses Potion", &FormulaBuilder::new("1d20")).with_item(
            ItemCheck {
                no_roll: true,
                base_value: Some(5),
                value_kind: ValueKind::Heal,
                value_bonus: 1,
                ..ItemCheck::default()
            },
        );
        let outcome = resolve(&request, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(outcome.roll.is_none());
        assert_eq!(outcome.kept_result(), None);
        assert!(outcome.all_results().is_empty());
        assert_eq!(outcome.outcome_class, OutcomeClass::Normal);
        assert_eq!(outcome.final_value, 6);
        assert!(outcome.flags.has_value);
    }

    #[test]
    fn malformed_formula_fails() {
        let request = RollRequest::new("Broken", &FormulaBuilder::new("1d").modifier(2));
        let err = resolve(&request, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, MechError::Formula(_)));
    }

    #[test]
    fn basic_check_has_no_value() {
        let request = RollRequest::new("Mira tests Mind", &FormulaBuilder::new("1d20").modifier(3));
        let outcome = resolve(&request, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(outcome.final_value, 0);
        assert!(!outcome.flags.has_details);
        assert_eq!(outcome.total(), Some(outcome.kept_result().unwrap() as i32 + 3));
    }

    #[test]
    fn card_payload_fields() {
        let mut actor = Actor::new(ActorKind::Character, "Mira");
        actor.img = "mira.png".into();
        let request = damage_request("1d20").with_description("Sharp.");
        let outcome = resolve(&request, &mut StdRng::seed_from_u64(3)).unwrap();
        let card = outcome.card(&request, &actor);

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["type"], "equipment");
        assert_eq!(json["actorName"], "Mira");
        assert_eq!(json["actorImg"], "mira.png");
        assert_eq!(json["hasDescription"], true);
        assert_eq!(json["hasActions"], true);
        assert_eq!(json["hasRollType"], true);
        assert_eq!(json["hasDetails"], true);
        assert_eq!(json["actions"], 2);
        assert_eq!(json["valueType"], "damage");
        assert_eq!(json["rollType"], "fantasy.aptitude.melee");
        assert_eq!(json["class"], outcome.outcome_class.css_class());
        assert_eq!(json.as_object().unwrap().len(), 18);
    }
}
