//! In-memory implementation of [`RoomStore`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hestia_app::ports::RoomStore;
use hestia_domain::error::HestiaError;
use hestia_domain::id::{HouseholdId, RoomId};
use hestia_domain::room::Room;

/// Thread-safe in-memory room store.
#[derive(Clone, Default)]
pub struct MemoryRoomStore {
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl MemoryRoomStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RoomId, Room>> {
        self.rooms.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RoomStore for MemoryRoomStore {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, HestiaError>> + Send {
        let mut rooms = self.lock();
        rooms.insert(room.id, room.clone());
        async { Ok(room) }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, HestiaError>> + Send {
        let result = self.lock().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Room>, HestiaError>> + Send {
        let result: Vec<Room> = self.lock().values().cloned().collect();
        async { Ok(result) }
    }

    fn find_by_household(
        &self,
        household_id: HouseholdId,
    ) -> impl Future<Output = Result<Vec<Room>, HestiaError>> + Send {
        let result: Vec<Room> = self
            .lock()
            .values()
            .filter(|room| room.household_id == Some(household_id))
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, HestiaError>> + Send {
        let mut rooms = self.lock();
        rooms.insert(room.id, room.clone());
        async { Ok(room) }
    }

    fn delete(&self, id: RoomId) -> impl Future<Output = Result<(), HestiaError>> + Send {
        let mut rooms = self.lock();
        rooms.remove(&id);
        async { Ok(()) }
    }
}
