//! Application services — use-case implementations.
//!
//! Each service receives its port implementations through generic type
//! parameters (constructor injection), so the use-case layer never names a
//! concrete adapter.

pub mod catalog_service;
pub mod device_service;
pub mod energy_service;
pub mod scene_service;
