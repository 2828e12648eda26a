//! Attribute specifications — constraint, default, and current value.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::AttributeValue;
use crate::error::ValidationError;

/// The shape of values an attribute accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeConstraint {
    /// Accepts `true` and `false`.
    Bool,
    /// Accepts integers within `min..=max`, both ends included.
    Range { min: i64, max: i64 },
    /// Accepts one of a fixed set of strings, compared case-sensitively.
    Choice { allowed: BTreeSet<String> },
}

impl AttributeConstraint {
    /// Whether `candidate` is acceptable under this constraint.
    #[must_use]
    pub fn permits(&self, candidate: &AttributeValue) -> bool {
        match (self, candidate) {
            (Self::Bool, AttributeValue::Bool(_)) => true,
            (Self::Range { min, max }, AttributeValue::Int(value)) => {
                (*min..=*max).contains(value)
            }
            (Self::Choice { allowed }, AttributeValue::String(value)) => allowed.contains(value),
            _ => false,
        }
    }
}

/// One named attribute of a device: its constraint, factory default, and
/// current value.
///
/// `current` only ever holds values that passed the constraint. A refused
/// write leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    constraint: AttributeConstraint,
    default: AttributeValue,
    current: AttributeValue,
}

impl AttributeSpec {
    /// Boolean attribute starting at `default`.
    #[must_use]
    pub fn bool(default: bool) -> Self {
        Self {
            constraint: AttributeConstraint::Bool,
            default: AttributeValue::Bool(default),
            current: AttributeValue::Bool(default),
        }
    }

    /// Bounded integer attribute over `min..=max`, starting at `default`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedRange`] when `min > max`, or
    /// [`ValidationError::RangeDefaultOutOfBounds`] when `default` falls
    /// outside the bounds.
    pub fn range(min: i64, max: i64, default: i64) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::InvertedRange { min, max });
        }
        if !(min..=max).contains(&default) {
            return Err(ValidationError::RangeDefaultOutOfBounds { default, min, max });
        }
        Ok(Self {
            constraint: AttributeConstraint::Range { min, max },
            default: AttributeValue::Int(default),
            current: AttributeValue::Int(default),
        })
    }

    /// Enumerated string attribute, starting at `default`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyChoices`] when `allowed` is empty,
    /// or [`ValidationError::ChoiceDefaultNotAllowed`] when `default` is
    /// not a member of `allowed`.
    pub fn choice<I, S>(allowed: I, default: impl Into<String>) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: BTreeSet<String> = allowed.into_iter().map(Into::into).collect();
        if allowed.is_empty() {
            return Err(ValidationError::EmptyChoices);
        }
        let default = default.into();
        if !allowed.contains(&default) {
            return Err(ValidationError::ChoiceDefaultNotAllowed { default });
        }
        Ok(Self {
            constraint: AttributeConstraint::Choice { allowed },
            default: AttributeValue::String(default.clone()),
            current: AttributeValue::String(default),
        })
    }

    /// The constraint governing writes.
    #[must_use]
    pub fn constraint(&self) -> &AttributeConstraint {
        &self.constraint
    }

    /// The factory default.
    #[must_use]
    pub fn default_value(&self) -> &AttributeValue {
        &self.default
    }

    /// The current value.
    #[must_use]
    pub fn current(&self) -> &AttributeValue {
        &self.current
    }

    /// Replace the current value if the constraint permits the candidate.
    ///
    /// Returns the previous value on success.
    ///
    /// # Errors
    ///
    /// Hands the refused candidate back when the constraint rejects it;
    /// the stored value stays as it was.
    pub fn set(&mut self, candidate: AttributeValue) -> Result<AttributeValue, AttributeValue> {
        if self.constraint.permits(&candidate) {
            Ok(std::mem::replace(&mut self.current, candidate))
        } else {
            Err(candidate)
        }
    }

    /// Restore the factory default.
    pub fn reset(&mut self) {
        self.current = self.default.clone();
    }
}
