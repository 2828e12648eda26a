//! # hestia-domain
//!
//! Pure domain model for the hestia smart-home control plane.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (appliances with a typed attribute registry and a
//!   power/connectivity state machine)
//! - Define **Attributes** (validated key/value command surface: boolean,
//!   bounded integer, and enumerated string attributes)
//! - Define **Scenes** (ordered batches of per-device attribute changes)
//! - Define **Usage** records and the **Energy** accountant that
//!   reconstructs consumption from power on/off events
//! - Define **Rooms** and **Households** (catalog groupings)
//! - Define **Events** (change records handed to observers)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod attribute;
pub mod device;
pub mod energy;
pub mod event;
pub mod household;
pub mod room;
pub mod scene;
pub mod usage;
