//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HestiaError`] via `#[from]` (no `String` variants).

use crate::attribute::AttributeValue;

/// Top-level error for all hestia operations.
#[derive(Debug, thiserror::Error)]
pub enum HestiaError {
    /// A domain invariant was violated at construction or update time.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An attribute write was refused by the registry.
    #[error("attribute error")]
    Attribute(#[from] AttributeError),

    /// A lookup by id found nothing.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A storage adapter failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Construction-time invariant violations. These abort the operation
/// entirely; nothing is partially applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("range is inverted: min {min} is greater than max {max}")]
    InvertedRange { min: i64, max: i64 },

    #[error("default {default} is outside of {min}..={max}")]
    RangeDefaultOutOfBounds { default: i64, min: i64, max: i64 },

    #[error("choice attribute needs at least one allowed value")]
    EmptyChoices,

    #[error("default {default:?} is not an allowed choice")]
    ChoiceDefaultNotAllowed { default: String },

    #[error("power draw must be a non-negative number of watts")]
    InvalidPowerDraw,

    #[error("unsupported device kind {kind:?}")]
    UnsupportedDeviceKind { kind: String },
}

/// Runtime attribute-write failures. The two cases are deliberately
/// distinct so batch callers can tell "no such attribute" apart from
/// "value refused"; in both cases the stored value is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributeError {
    #[error("unknown attribute {name:?}")]
    Unknown { name: String },

    #[error("value {value} is not allowed for attribute {name:?}")]
    Rejected { name: String, value: AttributeValue },
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Entity kind, e.g. `"Device"` or `"Scene"`.
    pub entity: &'static str,
    /// The id that was looked up, rendered as text.
    pub id: String,
}
