//! Roll requests.
//!
//! A basic check (an ability or aptitude test) and an item check share one
//! request type; the item-only fields live in [`ItemCheck`].

use wk_core::ValueKind;

use crate::dice::FormulaBuilder;
use crate::outcome::CriticalRange;

/// Fields only item checks carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCheck {
    /// The item is used without rolling.
    pub no_roll: bool,
    /// Action points the item costs.
    pub action_cost: u32,
    /// Base magnitude of the effect, if any.
    pub base_value: Option<i32>,
    /// What the value represents.
    pub value_kind: ValueKind,
    /// Per-use bonus added to the base value.
    pub value_bonus: i32,
    /// Localization key of the score rolled, e.g. `"fantasy.aptitude.melee"`.
    pub roll_category: Option<String>,
}

/// Basic check or item check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckKind {
    /// An ability or aptitude test with no value.
    #[default]
    Basic,
    /// Using an item.
    Item(ItemCheck),
}

/// A request for a roll, built by the caller and discarded after delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRequest {
    /// Card title.
    pub label: String,
    /// Icon reference.
    pub img: String,
    /// Critical range.
    pub critical_range: CriticalRange,
    /// Description text, already joined.
    pub description: String,
    /// Kind of the entity that triggered the roll (`"talent"`, `"aptitude"`...).
    pub entity_kind: String,
    /// Basic or item check.
    pub kind: CheckKind,
    formula: String,
}

impl RollRequest {
    /// Create a basic request with the formula produced by `builder`.
    pub fn new(label: impl Into<String>, builder: &FormulaBuilder) -> Self {
        Self {
            label: label.into(),
            img: String::new(),
            critical_range: CriticalRange::default(),
            description: String::new(),
            entity_kind: String::new(),
            kind: CheckKind::Basic,
            formula: builder.build(),
        }
    }

    /// The formula derived from the builder.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Set the icon.
    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = img.into();
        self
    }

    /// Set the critical range.
    pub fn with_critical_range(mut self, range: &str) -> Self {
        self.critical_range = CriticalRange::parse(range);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the entity kind.
    pub fn with_entity_kind(mut self, kind: impl Into<String>) -> Self {
        self.entity_kind = kind.into();
        self
    }

    /// Turn the request into an item check.
    pub fn with_item(mut self, check: ItemCheck) -> Self {
        self.kind = CheckKind::Item(check);
        self
    }

    /// Returns true if no dice are rolled.
    pub fn no_roll(&self) -> bool {
        matches!(&self.kind, CheckKind::Item(check) if check.no_roll)
    }

    /// Item fields, if this is an item check.
    pub fn item(&self) -> Option<&ItemCheck> {
        match &self.kind {
            CheckKind::Basic => None,
            CheckKind::Item(check) => Some(check),
        }
    }
}
