//! In-memory implementation of [`DeviceStore`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hestia_app::ports::DeviceStore;
use hestia_domain::device::Device;
use hestia_domain::error::HestiaError;
use hestia_domain::id::{DeviceId, RoomId};

/// Thread-safe in-memory device store.
///
/// All operations lock the map for their whole duration, so writes to one
/// device serialize and reads return a snapshot taken under the lock.
#[derive(Clone, Default)]
pub struct MemoryDeviceStore {
    devices: Arc<Mutex<HashMap<DeviceId, Device>>>,
}

impl MemoryDeviceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<DeviceId, Device>> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeviceStore for MemoryDeviceStore {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, HestiaError>> + Send {
        let mut devices = self.lock();
        devices.insert(device.id, device.clone());
        async { Ok(device) }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, HestiaError>> + Send {
        let result = self.lock().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, HestiaError>> + Send {
        let result: Vec<Device> = self.lock().values().cloned().collect();
        async { Ok(result) }
    }

    fn find_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Device>, HestiaError>> + Send {
        let result: Vec<Device> = self
            .lock()
            .values()
            .filter(|device| device.room_id == Some(room_id))
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, HestiaError>> + Send {
        let mut devices = self.lock();
        devices.insert(device.id, device.clone());
        async { Ok(device) }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), HestiaError>> + Send {
        let mut devices = self.lock();
        devices.remove(&id);
        async { Ok(()) }
    }
}
