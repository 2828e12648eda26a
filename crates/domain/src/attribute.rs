//! Attributes — the typed, validated key/value surface of a device.
//!
//! Every device carries a registry of named attributes. Each attribute
//! declares the shape of values it accepts (boolean, bounded integer, or
//! enumerated string), a factory default, and its current value. Writes
//! go through validation; a refused write never changes the stored value.

mod registry;
mod spec;
mod value;

pub use registry::AttributeRegistry;
pub use spec::{AttributeConstraint, AttributeSpec};
pub use value::AttributeValue;

use serde::{Deserialize, Serialize};

/// Audit record of one applied attribute write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub name: String,
    pub previous: AttributeValue,
    pub current: AttributeValue,
}
