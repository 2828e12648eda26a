//! Attribute registry — the per-device table of named attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AttributeChange, AttributeSpec, AttributeValue};
use crate::error::AttributeError;

/// The named attributes of one device.
///
/// The set of names is fixed when the owning device is assembled; writes
/// only ever replace values, never the schema. Iteration order is the
/// attribute name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRegistry {
    attributes: BTreeMap<String, AttributeSpec>,
}

impl AttributeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a specification. Used while assembling a device.
    pub fn insert(&mut self, name: impl Into<String>, spec: AttributeSpec) {
        self.attributes.insert(name.into(), spec);
    }

    /// Write `candidate` to the named attribute.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::Unknown`] when no attribute with `name`
    /// exists, or [`AttributeError::Rejected`] when the constraint refuses
    /// the candidate. Either way the stored value is left untouched.
    pub fn set_value(
        &mut self,
        name: &str,
        candidate: AttributeValue,
    ) -> Result<AttributeChange, AttributeError> {
        let Some(spec) = self.attributes.get_mut(name) else {
            return Err(AttributeError::Unknown {
                name: name.to_string(),
            });
        };
        match spec.set(candidate) {
            Ok(previous) => Ok(AttributeChange {
                name: name.to_string(),
                previous,
                current: spec.current().clone(),
            }),
            Err(value) => Err(AttributeError::Rejected {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Current value of the named attribute.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name).map(AttributeSpec::current)
    }

    /// Full specification of the named attribute.
    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.get(name)
    }

    /// Whether an attribute with `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the registry holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Name/spec pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeSpec)> {
        self.attributes.iter().map(|(name, spec)| (name.as_str(), spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thermostat_registry() -> AttributeRegistry {
        let mut registry = AttributeRegistry::new();
        registry.insert("temperature", AttributeSpec::range(16, 30, 24).unwrap());
        registry.insert(
            "mode",
            AttributeSpec::choice(["AUTO", "COOL", "HEAT"], "AUTO").unwrap(),
        );
        registry.insert("swing", AttributeSpec::bool(false));
        registry
    }

    #[test]
    fn should_apply_valid_write_and_report_previous_value() {
        let mut registry = thermostat_registry();
        let change = registry
            .set_value("temperature", AttributeValue::Int(26))
            .unwrap();

        assert_eq!(change.name, "temperature");
        assert_eq!(change.previous, AttributeValue::Int(24));
        assert_eq!(change.current, AttributeValue::Int(26));
        assert_eq!(registry.value("temperature"), Some(&AttributeValue::Int(26)));
    }

    #[test]
    fn should_report_unknown_attribute_by_name() {
        let mut registry = thermostat_registry();
        let result = registry.set_value("humidity", AttributeValue::Int(40));
        assert_eq!(
            result,
            Err(AttributeError::Unknown {
                name: "humidity".to_string()
            })
        );
    }

    #[test]
    fn should_keep_stored_value_when_write_is_rejected() {
        let mut registry = thermostat_registry();
        registry
            .set_value("temperature", AttributeValue::Int(28))
            .unwrap();

        let result = registry.set_value("temperature", AttributeValue::Int(31));
        assert_eq!(
            result,
            Err(AttributeError::Rejected {
                name: "temperature".to_string(),
                value: AttributeValue::Int(31),
            })
        );
        assert_eq!(registry.value("temperature"), Some(&AttributeValue::Int(28)));
    }

    #[test]
    fn should_expose_contains_and_len() {
        let registry = thermostat_registry();
        assert!(registry.contains("mode"));
        assert!(!registry.contains("humidity"));
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn should_iterate_in_name_order() {
        let registry = thermostat_registry();
        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["mode", "swing", "temperature"]);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let registry = thermostat_registry();
        let json = serde_json::to_string(&registry).unwrap();
        let parsed: AttributeRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, registry);
    }
}
