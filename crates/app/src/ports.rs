//! Port definitions — traits that adapters implement.
//!
//! A port marks the seam between the application core and the outside
//! world. Declaring the traits here in `app` lets services and adapters
//! share the contract without depending on each other.

pub mod event_bus;
pub mod storage;

pub use event_bus::EventPublisher;
pub use storage::{DeviceStore, HouseholdStore, RoomStore, SceneStore};
