//! Household — the top-level grouping: one home.

use serde::{Deserialize, Serialize};

use crate::error::{HestiaError, ValidationError};
use crate::id::HouseholdId;

/// One home, grouping rooms and their devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub id: HouseholdId,
    pub name: String,
}

impl Household {
    /// Create a builder for constructing a [`Household`].
    #[must_use]
    pub fn builder() -> HouseholdBuilder {
        HouseholdBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HestiaError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Household`].
#[derive(Debug, Default)]
pub struct HouseholdBuilder {
    id: Option<HouseholdId>,
    name: Option<String>,
}

impl HouseholdBuilder {
    #[must_use]
    pub fn id(mut self, id: HouseholdId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`Household`].
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Household, HestiaError> {
        let household = Household {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
        };
        household.validate()?;
        Ok(household)
    }
}
