//! Scene — a named, ordered batch of per-device attribute changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeValue;
use crate::error::{HestiaError, ValidationError};
use crate::id::{DeviceId, SceneId};

/// Attribute assignments for one device, keyed by attribute name.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// One device's slot in a scene: the target and the values to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneBinding {
    pub device_id: DeviceId,
    pub attributes: AttributeMap,
}

/// A named batch of attribute changes across devices.
///
/// Bindings keep the order in which devices were first added. Adding more
/// values for an already-bound device merges into its existing slot, the
/// newest value winning per key, without moving the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    pub description: String,
    bindings: Vec<SceneBinding>,
}

impl Scene {
    /// Create a builder for constructing a [`Scene`].
    #[must_use]
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HestiaError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Add values for `device_id`, merging into an existing binding.
    pub fn bind(&mut self, device_id: DeviceId, attributes: AttributeMap) {
        if let Some(existing) = self
            .bindings
            .iter_mut()
            .find(|binding| binding.device_id == device_id)
        {
            existing.attributes.extend(attributes);
        } else {
            self.bindings.push(SceneBinding {
                device_id,
                attributes,
            });
        }
    }

    /// Remove the binding for `device_id`, reporting whether one existed.
    pub fn unbind(&mut self, device_id: DeviceId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|binding| binding.device_id != device_id);
        self.bindings.len() != before
    }

    /// Bindings in application order.
    #[must_use]
    pub fn bindings(&self) -> &[SceneBinding] {
        &self.bindings
    }

    /// The binding for `device_id`, if present.
    #[must_use]
    pub fn binding_for(&self, device_id: DeviceId) -> Option<&SceneBinding> {
        self.bindings
            .iter()
            .find(|binding| binding.device_id == device_id)
    }
}

/// Step-by-step builder for [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    id: Option<SceneId>,
    name: Option<String>,
    description: Option<String>,
    bindings: Vec<(DeviceId, AttributeMap)>,
}

impl SceneBuilder {
    #[must_use]
    pub fn id(mut self, id: SceneId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add values for a device; repeated calls for the same device merge.
    #[must_use]
    pub fn binding(mut self, device_id: DeviceId, attributes: AttributeMap) -> Self {
        self.bindings.push((device_id, attributes));
        self
    }

    /// Consume the builder, validate, and return a [`Scene`].
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Scene, HestiaError> {
        let mut scene = Scene {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            bindings: Vec::new(),
        };
        for (device_id, attributes) in self.bindings {
            scene.bind(device_id, attributes);
        }
        scene.validate()?;
        Ok(scene)
    }
}
