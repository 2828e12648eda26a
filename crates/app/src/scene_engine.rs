//! Scene engine — applies a scene's bindings to their target devices.
//!
//! Bindings run in the order the scene holds them. Failures stay contained
//! to their binding: a missing device or a refused value never stops the
//! rest of the run, and already-applied bindings are not rolled back.

use hestia_domain::attribute::AttributeValue;
use hestia_domain::device::{Device, ONLINE_KEY, POWER_KEY};
use hestia_domain::error::{AttributeError, HestiaError};
use hestia_domain::event::{Event, EventType};
use hestia_domain::id::{DeviceId, SceneId};
use hestia_domain::scene::{Scene, SceneBinding};
use hestia_domain::time;

use crate::ports::{DeviceStore, EventPublisher};

/// How a single binding fared.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingStatus {
    /// Every key of the binding applied.
    Applied,
    /// The target device does not exist.
    DeviceMissing,
    /// A key was unknown, or a value was refused.
    Rejected(AttributeError),
}

/// Outcome of one binding of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingOutcome {
    pub device_id: DeviceId,
    pub status: BindingStatus,
}

/// Result of executing (or dry-running) a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRun {
    pub scene_id: SceneId,
    pub outcomes: Vec<BindingOutcome>,
}

impl SceneRun {
    /// Number of bindings that fully applied.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, BindingStatus::Applied))
            .count()
    }

    /// Number of bindings attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// `(succeeded, total)` in one call.
    #[must_use]
    pub fn tally(&self) -> (usize, usize) {
        (self.succeeded(), self.total())
    }
}

/// Applies scenes to devices, binding by binding.
pub struct SceneEngine<DS, P> {
    devices: DS,
    publisher: P,
}

impl<DS, P> SceneEngine<DS, P>
where
    DS: DeviceStore,
    P: EventPublisher,
{
    /// Create a new engine.
    pub fn new(devices: DS, publisher: P) -> Self {
        Self { devices, publisher }
    }

    /// Execute a scene, applying its bindings in order.
    ///
    /// Each binding first resolves its device and checks that every key is
    /// recognized; an unknown key rejects the binding before anything is
    /// written. Keys then apply one by one — `power` and `online` drive the
    /// device state machines, everything else goes through the attribute
    /// registry. A refused value marks the binding as failed but keys that
    /// already applied stay applied.
    ///
    /// # Errors
    ///
    /// Returns a storage error from loading or saving devices. Per-binding
    /// failures are reported through the [`SceneRun`], never as `Err`.
    pub async fn execute(&self, scene: &Scene) -> Result<SceneRun, HestiaError> {
        let mut outcomes = Vec::with_capacity(scene.bindings().len());
        for binding in scene.bindings() {
            let outcome = self.apply_binding(scene.id, binding).await?;
            outcomes.push(outcome);
        }

        let run = SceneRun {
            scene_id: scene.id,
            outcomes,
        };

        // The tally goes out even when every binding failed.
        let (succeeded, total) = run.tally();
        let event = Event::new(
            EventType::SceneTriggered,
            None,
            serde_json::json!({
                "scene_id": scene.id,
                "scene_name": scene.name,
                "succeeded": succeeded,
                "total": total,
            }),
        );
        let _ = self.publisher.publish(event).await;

        Ok(run)
    }

    /// Dry-run a scene: resolve each target device and check every key,
    /// without writing anything or publishing events.
    ///
    /// # Errors
    ///
    /// Returns a storage error from loading devices.
    pub async fn validate(&self, scene: &Scene) -> Result<SceneRun, HestiaError> {
        let mut outcomes = Vec::with_capacity(scene.bindings().len());
        for binding in scene.bindings() {
            let status = match self.devices.get_by_id(binding.device_id).await? {
                None => BindingStatus::DeviceMissing,
                Some(device) => match unknown_key(&device, binding) {
                    Some(name) => BindingStatus::Rejected(AttributeError::Unknown { name }),
                    None => BindingStatus::Applied,
                },
            };
            outcomes.push(BindingOutcome {
                device_id: binding.device_id,
                status,
            });
        }
        Ok(SceneRun {
            scene_id: scene.id,
            outcomes,
        })
    }

    async fn apply_binding(
        &self,
        scene_id: SceneId,
        binding: &SceneBinding,
    ) -> Result<BindingOutcome, HestiaError> {
        let Some(mut device) = self.devices.get_by_id(binding.device_id).await? else {
            return Ok(BindingOutcome {
                device_id: binding.device_id,
                status: BindingStatus::DeviceMissing,
            });
        };

        // An unknown key rejects the whole binding before any key applies.
        if let Some(name) = unknown_key(&device, binding) {
            return Ok(BindingOutcome {
                device_id: binding.device_id,
                status: BindingStatus::Rejected(AttributeError::Unknown { name }),
            });
        }

        let mut failure: Option<AttributeError> = None;
        let mut events = Vec::new();
        for (name, value) in &binding.attributes {
            match apply_key(scene_id, &mut device, name, value) {
                Ok(event) => events.push(event),
                // Keep the first error; later keys still apply.
                Err(error) => failure = failure.or(Some(error)),
            }
        }

        self.devices.update(device).await?;
        for event in events {
            let _ = self.publisher.publish(event).await;
        }

        let status = match failure {
            None => BindingStatus::Applied,
            Some(error) => BindingStatus::Rejected(error),
        };
        Ok(BindingOutcome {
            device_id: binding.device_id,
            status,
        })
    }
}

/// Apply one key to a device, routing `power` and `online` into the state
/// machines and everything else into the attribute registry.
fn apply_key(
    scene_id: SceneId,
    device: &mut Device,
    name: &str,
    value: &AttributeValue,
) -> Result<Event, AttributeError> {
    match name {
        POWER_KEY => {
            let Some(on) = value.as_bool() else {
                return Err(AttributeError::Rejected {
                    name: name.to_owned(),
                    value: value.clone(),
                });
            };
            let from = device.power().to_string();
            if on {
                device.power_on(time::now());
            } else {
                device.power_off(time::now());
            }
            Ok(Event::new(
                EventType::PowerChanged,
                Some(device.id),
                serde_json::json!({
                    "from": from,
                    "to": device.power().to_string(),
                    "scene_id": scene_id,
                }),
            ))
        }
        ONLINE_KEY => {
            let Some(online) = value.as_bool() else {
                return Err(AttributeError::Rejected {
                    name: name.to_owned(),
                    value: value.clone(),
                });
            };
            let from = device.online().to_string();
            if online {
                device.connect();
            } else {
                device.disconnect();
            }
            Ok(Event::new(
                EventType::ConnectionChanged,
                Some(device.id),
                serde_json::json!({
                    "from": from,
                    "to": device.online().to_string(),
                    "scene_id": scene_id,
                }),
            ))
        }
        _ => {
            let change = device.set_attribute(name, value.clone())?;
            Ok(Event::new(
                EventType::AttributeChanged,
                Some(device.id),
                serde_json::json!({
                    "attribute": change.name,
                    "from": change.previous,
                    "to": change.current,
                    "scene_id": scene_id,
                }),
            ))
        }
    }
}

/// First key of the binding the device does not recognize, if any.
/// The intercepted `power` and `online` keys are always recognized.
fn unknown_key(device: &Device, binding: &SceneBinding) -> Option<String> {
    binding
        .attributes
        .keys()
        .find(|name| {
            let name = name.as_str();
            name != POWER_KEY && name != ONLINE_KEY && !device.attributes().contains(name)
        })
        .cloned()
}
