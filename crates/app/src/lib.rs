//! # hestia-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceStore` — CRUD for devices
//!   - `SceneStore` — CRUD for scenes
//!   - `RoomStore` — CRUD for rooms
//!   - `HouseholdStore` — CRUD for households
//!   - `EventPublisher` — fan events out to whoever listens
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService` — register, command, list, get
//!   - `SceneService` — author scenes, trigger and check them
//!   - `EnergyService` — consumption reports over usage ledgers
//!   - `CatalogService` — household and room bookkeeping
//!   - `SceneEngine` — apply a scene's bindings, binding by binding
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `hestia-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod scene_engine;
pub mod services;
