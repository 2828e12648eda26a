//! Storage ports — repository traits for persisted aggregates.

use std::future::Future;

use hestia_domain::device::Device;
use hestia_domain::error::HestiaError;
use hestia_domain::household::Household;
use hestia_domain::id::{DeviceId, HouseholdId, RoomId, SceneId};
use hestia_domain::room::Room;
use hestia_domain::scene::Scene;

/// CRUD access to stored devices.
pub trait DeviceStore {
    /// Persist a new device.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, HestiaError>> + Send;

    /// Get a device by its unique identifier.
    fn get_by_id(&self, id: DeviceId) -> impl Future<Output = Result<Option<Device>, HestiaError>> + Send;

    /// List all devices.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, HestiaError>> + Send;

    /// List the devices assigned to a room.
    fn find_by_room(&self, room_id: RoomId) -> impl Future<Output = Result<Vec<Device>, HestiaError>> + Send;

    /// Update an existing device.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, HestiaError>> + Send;

    /// Delete a device by id.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HestiaError>> + Send;
}

/// CRUD access to stored scenes.
pub trait SceneStore {
    /// Persist a new scene.
    fn create(&self, scene: Scene) -> impl Future<Output = Result<Scene, HestiaError>> + Send;

    /// Get a scene by its unique identifier.
    fn get_by_id(&self, id: SceneId) -> impl Future<Output = Result<Option<Scene>, HestiaError>> + Send;

    /// List all scenes.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Scene>, HestiaError>> + Send;

    /// Update an existing scene.
    fn update(&self, scene: Scene) -> impl Future<Output = Result<Scene, HestiaError>> + Send;

    /// Delete a scene by id.
    fn delete(&self, id: SceneId) -> impl Future<Output = Result<(), HestiaError>> + Send;
}

/// CRUD access to stored rooms.
pub trait RoomStore {
    /// Persist a new room.
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, HestiaError>> + Send;

    /// Get a room by its unique identifier.
    fn get_by_id(&self, id: RoomId) -> impl Future<Output = Result<Option<Room>, HestiaError>> + Send;

    /// List all rooms.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, HestiaError>> + Send;

    /// List the rooms belonging to a household.
    fn find_by_household(
        &self,
        household_id: HouseholdId,
    ) -> impl Future<Output = Result<Vec<Room>, HestiaError>> + Send;

    /// Update an existing room.
    fn update(&self, room: Room) -> impl Future<Output = Result<Room, HestiaError>> + Send;

    /// Delete a room by id.
    fn delete(&self, id: RoomId) -> impl Future<Output = Result<(), HestiaError>> + Send;
}

/// CRUD access to stored households.
pub trait HouseholdStore {
    /// Persist a new household.
    fn create(&self, household: Household) -> impl Future<Output = Result<Household, HestiaError>> + Send;

    /// Get a household by its unique identifier.
    fn get_by_id(
        &self,
        id: HouseholdId,
    ) -> impl Future<Output = Result<Option<Household>, HestiaError>> + Send;

    /// List all households.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Household>, HestiaError>> + Send;

    /// Update an existing household.
    fn update(&self, household: Household) -> impl Future<Output = Result<Household, HestiaError>> + Send;

    /// Delete a household by id.
    fn delete(&self, id: HouseholdId) -> impl Future<Output = Result<(), HestiaError>> + Send;
}
