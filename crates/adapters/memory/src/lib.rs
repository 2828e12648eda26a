//! # hestia-adapter-memory
//!
//! In-memory storage adapter — implements the storage port traits from
//! `hestia-app` on top of process-local hash maps.
//!
//! ## Responsibilities
//! - Implement `DeviceStore`, `SceneStore`, `RoomStore`, `HouseholdStore`
//! - Serialize concurrent access behind one mutex per store
//! - Hand out value snapshots, so a reader never observes a half-applied
//!   write and an energy query works on a point-in-time ledger
//!
//! Stores are cheap to clone: clones share the same underlying map, the
//! way pooled database handles share a connection pool.
//!
//! ## Dependency rule
//! Depends on `hestia-app` (for port traits) and `hestia-domain` (for domain
//! types). The `app` and `domain` crates must never reference this adapter.

mod device_store;
mod household_store;
mod room_store;
mod scene_store;

pub use device_store::MemoryDeviceStore;
pub use household_store::MemoryHouseholdStore;
pub use room_store::MemoryRoomStore;
pub use scene_store::MemorySceneStore;
