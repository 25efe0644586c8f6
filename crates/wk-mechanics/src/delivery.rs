//! Handing resolved outcomes to the outside world.
//!
//! Rendering a card and persisting update intents are the only places the
//! engine suspends. Failures are collected and logged, never retried, and
//! never undo the outcome that produced them.

use async_trait::async_trait;
use wk_core::UpdateIntent;

use crate::dice::RollResult;
use crate::error::DeliveryError;
use crate::resolve::ChatCard;

/// Displays a resolved card.
#[async_trait]
pub trait CardRenderer: Send {
    /// Render `card`, with the dice when a roll was made.
    async fn render(&mut self, card: &ChatCard, roll: Option<&RollResult>)
    -> Result<(), DeliveryError>;
}

/// Stores update intents.
#[async_trait]
pub trait Persistence: Send {
    /// Write one intent.
    async fn write(&mut self, intent: &UpdateIntent) -> Result<(), DeliveryError>;
}

/// What happened during delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// The card was rendered.
    pub rendered: bool,
    /// Intents written successfully.
    pub written: usize,
    /// Every failure, in order.
    pub failures: Vec<DeliveryError>,
}

impl DeliveryReport {
    /// Returns true if nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render the card (if any), then write each intent in order.
pub async fn deliver<C, P>(
    renderer: &mut C,
    store: &mut P,
    card: Option<&ChatCard>,
    roll: Option<&RollResult>,
    intents: &[UpdateIntent],
) -> DeliveryReport
where
    C: CardRenderer + ?Sized,
    P: Persistence + ?Sized,
{
    let mut report = DeliveryReport::default();

    if let Some(card) = card {
        match renderer.render(card, roll).await {
            Ok(()) => report.rendered = true,
            Err(e) => {
                tracing::warn!(label = %card.label, error = %e, "card not rendered");
                report.failures.push(e);
            }
        }
    }

    for intent in intents {
        match store.write(intent).await {
            Ok(()) => report.written += 1,
            Err(e) => {
                tracing::warn!(
                    intent_target = %intent.target,
                    field = %intent.field,
                    error = %e,
                    "intent not written"
                );
                report.failures.push(e);
            }
        }
    }

    report
}
