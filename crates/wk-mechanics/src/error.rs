//! Error types for the mechanics engine.

use wk_core::CoreError;

/// Errors that abort a roll or a resource change at the request boundary.
///
/// None of these leave a partial mutation behind: every check runs before
/// the first write.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice formula could not be parsed or evaluated.
    #[error("invalid formula: {0}")]
    Formula(String),

    /// Not enough action points for the requested action.
    #[error("not enough actions: {required} required, {available} available")]
    InsufficientResource {
        /// Action points the action costs.
        required: u32,
        /// Action points the actor has left.
        available: u32,
    },

    /// The talent cannot be used again yet.
    #[error("must wait {remaining} more {} before reuse", rounds_word(.remaining))]
    OnCooldown {
        /// Rounds left on the cooldown.
        remaining: u32,
    },

    /// The request is not allowed in the current state (e.g. a depleted item).
    #[error("validation error: {0}")]
    Validation(String),

    /// The engine configuration is invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A roster lookup or update intent failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

fn rounds_word(n: &u32) -> &'static str {
    if *n == 1 { "round" } else { "rounds" }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

/// A failure reported by a rendering or persistence collaborator.
///
/// Delivery failures never undo a resolved outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The card could not be rendered.
    #[error("render failed: {0}")]
    Render(String),

    /// An update intent could not be written.
    #[error("write failed: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_message_pluralizes() {
        assert_eq!(
            MechError::OnCooldown { remaining: 1 }.to_string(),
            "must wait 1 more round before reuse"
        );
        assert_eq!(
            MechError::OnCooldown { remaining: 3 }.to_string(),
            "must wait 3 more rounds before reuse"
        );
    }

    #[test]
    fn insufficient_message() {
        let err = MechError::InsufficientResource {
            required: 3,
            available: 1,
        };
        assert_eq!(err.to_string(), "not enough actions: 3 required, 1 available");
    }
}
