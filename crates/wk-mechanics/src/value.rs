//! Final magnitude of an item's effect and the card's display flags.

use wk_core::ValueKind;

use crate::outcome::OutcomeClass;

/// Resolve the effect value: `base + bonus`, doubled on a critical,
/// zeroed on a fumble.
pub fn resolve_value(base: i32, bonus: i32, class: OutcomeClass) -> i32 {
    let value = base.saturating_add(bonus);
    match class {
        OutcomeClass::Normal => value,
        OutcomeClass::Critical => value.saturating_mul(2),
        OutcomeClass::Fumble => 0,
    }
}

/// Which optional sections a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFlags {
    /// The value is shown (kind is not `none` and the value is non-zero).
    pub has_value: bool,
    /// The action cost is shown.
    pub has_actions: bool,
    /// The roll category is shown.
    pub has_roll_category: bool,
    /// Any of the above.
    pub has_details: bool,
}

impl DisplayFlags {
    /// Derive the flags from a resolved value and the request's extras.
    pub fn new(
        kind: ValueKind,
        value: i32,
        action_cost: Option<u32>,
        roll_category: Option<&str>,
    ) -> Self {
        let has_value = kind != ValueKind::None && value != 0;
        let has_actions = action_cost.is_some_and(|cost| cost > 0);
        let has_roll_category = roll_category.is_some_and(|c| !c.is_empty());
        Self {
            has_value,
            has_actions,
            has_roll_category,
            has_details: has_value || has_actions || has_roll_category,
        }
    }
}
