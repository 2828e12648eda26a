//! Catalog service — use-cases for households and the rooms inside them.

use hestia_domain::error::{HestiaError, NotFoundError};
use hestia_domain::household::Household;
use hestia_domain::id::{HouseholdId, RoomId};
use hestia_domain::room::Room;

use crate::ports::{HouseholdStore, RoomStore};

/// Application service for household and room CRUD operations.
pub struct CatalogService<HS, RS> {
    households: HS,
    rooms: RS,
}

impl<HS: HouseholdStore, RS: RoomStore> CatalogService<HS, RS> {
    /// Create a new service backed by the given stores.
    pub fn new(households: HS, rooms: RS) -> Self {
        Self { households, rooms }
    }

    /// Create a new household after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if invariants fail, or a
    /// storage error propagated from the store.
    pub async fn create_household(&self, household: Household) -> Result<Household, HestiaError> {
        household.validate()?;
        self.households.create(household).await
    }

    /// Look up a household by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no household with `id`
    /// exists, or a storage error from the store.
    pub async fn get_household(&self, id: HouseholdId) -> Result<Household, HestiaError> {
        self.households.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Household",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all households.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_households(&self) -> Result<Vec<Household>, HestiaError> {
        self.households.get_all().await
    }

    /// Delete a household by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn delete_household(&self, id: HouseholdId) -> Result<(), HestiaError> {
        self.households.delete(id).await
    }

    /// Create a new room after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if invariants fail, or a
    /// storage error propagated from the store.
    pub async fn create_room(&self, room: Room) -> Result<Room, HestiaError> {
        room.validate()?;
        self.rooms.create(room).await
    }

    /// Look up a room by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no room with `id` exists,
    /// or a storage error from the store.
    pub async fn get_room(&self, id: RoomId) -> Result<Room, HestiaError> {
        self.rooms.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Room",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rooms.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, HestiaError> {
        self.rooms.get_all().await
    }

    /// List the rooms belonging to a household.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn rooms_in_household(
        &self,
        household_id: HouseholdId,
    ) -> Result<Vec<Room>, HestiaError> {
        self.rooms.find_by_household(household_id).await
    }

    /// Update an existing room.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if invariants fail, or a
    /// storage error from the store.
    pub async fn update_room(&self, room: Room) -> Result<Room, HestiaError> {
        room.validate()?;
        self.rooms.update(room).await
    }

    /// Delete a room by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn delete_room(&self, id: RoomId) -> Result<(), HestiaError> {
        self.rooms.delete(id).await
    }
}
