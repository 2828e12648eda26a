//! Event — an immutable record of something that happened.
//!
//! Events are produced when devices register, attributes change, power or
//! connectivity flips, and scenes run. The domain only emits them;
//! rendering or persisting them is an observer's business.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, EventId};
use crate::time::Timestamp;

/// What an event describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DeviceRegistered,
    DeviceRemoved,
    AttributeChanged,
    PowerChanged,
    ConnectionChanged,
    SceneTriggered,
}

/// A change record handed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    /// The device the change concerns, when there is a single one.
    pub device_id: Option<DeviceId>,
    /// Type-specific payload: old/new values, tallies, names.
    pub data: serde_json::Value,
    pub at: Timestamp,
}

impl Event {
    /// Create an event stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(event_type: EventType, device_id: Option<DeviceId>, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            device_id,
            data,
            at: crate::time::now(),
        }
    }
}
