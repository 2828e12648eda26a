//! Room — a physical space inside a household, holding devices.

use serde::{Deserialize, Serialize};

use crate::error::{HestiaError, ValidationError};
use crate::id::{HouseholdId, RoomId};

/// A room devices can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub household_id: Option<HouseholdId>,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
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

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    household_id: Option<HouseholdId>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn household_id(mut self, household_id: HouseholdId) -> Self {
        self.household_id = Some(household_id);
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Room, HestiaError> {
        let room = Room {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            household_id: self.household_id,
        };
        room.validate()?;
        Ok(room)
    }
}
