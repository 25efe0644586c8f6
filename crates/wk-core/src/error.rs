use crate::entity::ActorId;
use crate::item::ItemId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while looking up or updating roster data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested actor does not exist in the roster.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The requested item does not exist on the actor.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// A field path outside the known update schema.
    #[error("unknown field path: \"{0}\"")]
    UnknownField(String),

    /// A known field path aimed at the wrong kind of target.
    #[error("field \"{field}\" cannot be written on {target}")]
    FieldTargetMismatch {
        /// The offending field path.
        field: String,
        /// The kind of target the intent addressed.
        target: &'static str,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),

    /// A roster document could not be read or written.
    #[error("roster document error: {0}")]
    Json(#[from] serde_json::Error),
}
