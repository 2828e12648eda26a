//! Device service — use-cases for registering and commanding devices.

use hestia_domain::attribute::{AttributeChange, AttributeValue};
use hestia_domain::device::Device;
use hestia_domain::error::{HestiaError, NotFoundError};
use hestia_domain::event::{Event, EventType};
use hestia_domain::id::{DeviceId, RoomId};
use hestia_domain::time::now;

use crate::ports::{DeviceStore, EventPublisher};

/// Application service for device lifecycle and direct commands.
///
/// Commands go through the domain state machines and attribute registry,
/// then persist the device and publish the matching event. Event publishing
/// is fire-and-forget; a full bus never fails a command.
pub struct DeviceService<S, P> {
    store: S,
    publisher: P,
}

impl<S: DeviceStore, P: EventPublisher> DeviceService<S, P> {
    /// Create a new service backed by the given store and publisher.
    pub fn new(store: S, publisher: P) -> Self {
        Self { store, publisher }
    }

    /// Register a new device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if invariants fail, or a
    /// storage error propagated from the store.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name))]
    pub async fn register_device(&self, device: Device) -> Result<Device, HestiaError> {
        device.validate()?;
        let device = self.store.create(device).await?;
        let event = Event::new(
            EventType::DeviceRegistered,
            Some(device.id),
            serde_json::json!({"name": device.name, "kind": device.kind}),
        );
        let _ = self.publisher.publish(event).await;
        Ok(device)
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no device with `id` exists,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, HestiaError> {
        self.store.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_devices(&self) -> Result<Vec<Device>, HestiaError> {
        self.store.get_all().await
    }

    /// List the devices assigned to a room.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Device>, HestiaError> {
        self.store.find_by_room(room_id).await
    }

    /// Rename a device.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the device does not exist,
    /// [`HestiaError::Validation`] if the new name is empty, or a storage
    /// error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn rename_device(&self, id: DeviceId, name: String) -> Result<Device, HestiaError> {
        let mut device = self.get_device(id).await?;
        device.name = name;
        device.validate()?;
        self.store.update(device).await
    }

    /// Move a device into a room, or out of any room with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the device does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn assign_room(
        &self,
        id: DeviceId,
        room_id: Option<RoomId>,
    ) -> Result<Device, HestiaError> {
        let mut device = self.get_device(id).await?;
        device.room_id = room_id;
        self.store.update(device).await
    }

    /// Write one attribute on a device and publish the change.
    ///
    /// A refused write leaves the stored device untouched: the device is
    /// only persisted after the registry accepted the value.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the device does not exist,
    /// [`HestiaError::Attribute`] if the key is unknown or the value
    /// refused, or a storage error from the store.
    #[tracing::instrument(skip(self, value))]
    pub async fn set_attribute(
        &self,
        id: DeviceId,
        name: &str,
        value: AttributeValue,
    ) -> Result<AttributeChange, HestiaError> {
        let mut device = self.get_device(id).await?;
        let change = device.set_attribute(name, value)?;
        self.store.update(device).await?;
        let event = Event::new(
            EventType::AttributeChanged,
            Some(id),
            serde_json::json!({
                "attribute": change.name,
                "from": change.previous,
                "to": change.current,
            }),
        );
        let _ = self.publisher.publish(event).await;
        Ok(change)
    }

    /// Power a device on now, opening a usage span.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the device does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn power_on(&self, id: DeviceId) -> Result<Device, HestiaError> {
        let mut device = self.get_device(id).await?;
        let from = device.power().to_string();
        device.power_on(now());
        let device = self.store.update(device).await?;
        self.publish_transition(EventType::PowerChanged, &device, from, device.power().to_string())
            .await;
        Ok(device)
    }

    /// Power a device off now, committing the open usage span.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the device does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn power_off(&self, id: DeviceId) -> Result<Device, HestiaError> {
        let mut device = self.get_device(id).await?;
        let from = device.power().to_string();
        device.power_off(now());
        let device = self.store.update(device).await?;
        self.publish_transition(EventType::PowerChanged, &device, from, device.power().to_string())
            .await;
        Ok(device)
    }

    /// Mark a device reachable.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the device does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn connect_device(&self, id: DeviceId) -> Result<Device, HestiaError> {
        let mut device = self.get_device(id).await?;
        let from = device.online().to_string();
        device.connect();
        let device = self.store.update(device).await?;
        self.publish_transition(
            EventType::ConnectionChanged,
            &device,
            from,
            device.online().to_string(),
        )
        .await;
        Ok(device)
    }

    /// Mark a device unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the device does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn disconnect_device(&self, id: DeviceId) -> Result<Device, HestiaError> {
        let mut device = self.get_device(id).await?;
        let from = device.online().to_string();
        device.disconnect();
        let device = self.store.update(device).await?;
        self.publish_transition(
            EventType::ConnectionChanged,
            &device,
            from,
            device.online().to_string(),
        )
        .await;
        Ok(device)
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] if the device does not exist,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), HestiaError> {
        let device = self.get_device(id).await?;
        self.store.delete(id).await?;
        let event = Event::new(
            EventType::DeviceRemoved,
            Some(id),
            serde_json::json!({"name": device.name}),
        );
        let _ = self.publisher.publish(event).await;
        Ok(())
    }

    async fn publish_transition(
        &self,
        event_type: EventType,
        device: &Device,
        from: String,
        to: String,
    ) {
        let event = Event::new(
            event_type,
            Some(device.id),
            serde_json::json!({"from": from, "to": to}),
        );
        let _ = self.publisher.publish(event).await;
    }
}
