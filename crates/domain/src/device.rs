//! Device — an appliance with typed attributes, connectivity and power
//! state, and a usage ledger feeding energy accounting.

use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeChange, AttributeRegistry, AttributeSpec, AttributeValue};
use crate::error::{AttributeError, HestiaError, ValidationError};
use crate::id::{DeviceId, RoomId};
use crate::time::Timestamp;
use crate::usage::{UsageEventKind, UsageInterval, UsageLedger};

mod kind;
mod state;

pub use kind::DeviceKind;
pub use state::{ConnectMode, OnlineState, PowerMode, PowerState};

/// Attribute key scenes use to drive the power state machine instead of
/// the registry.
pub const POWER_KEY: &str = "power";

/// Attribute key scenes use to drive connectivity instead of the registry.
pub const ONLINE_KEY: &str = "online";

/// An appliance known to the control plane.
///
/// Attributes and the usage ledger are reachable read-only; all writes go
/// through [`Device::set_attribute`] and the power/connectivity methods so
/// validation and interval bookkeeping cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub manufacturer: Option<String>,
    pub room_id: Option<RoomId>,
    pub kind: DeviceKind,
    pub connect_mode: ConnectMode,
    pub power_mode: PowerMode,
    /// Rated draw in watts while powered.
    pub power_draw_watts: f64,
    online: OnlineState,
    power: PowerState,
    last_powered_on: Option<Timestamp>,
    attributes: AttributeRegistry,
    ledger: UsageLedger,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] when `name` is empty or
    /// `power_draw_watts` is negative or not a number.
    pub fn validate(&self) -> Result<(), HestiaError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.power_draw_watts.is_nan() || self.power_draw_watts < 0.0 {
            return Err(ValidationError::InvalidPowerDraw.into());
        }
        Ok(())
    }

    /// Read access to the attribute table.
    #[must_use]
    pub fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }

    /// The power on/off history backing energy accounting.
    #[must_use]
    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Current connectivity.
    #[must_use]
    pub fn online(&self) -> &OnlineState {
        &self.online
    }

    /// Current power state.
    #[must_use]
    pub fn power(&self) -> &PowerState {
        &self.power
    }

    /// When the device last powered on, while it remains powered.
    #[must_use]
    pub fn last_powered_on(&self) -> Option<Timestamp> {
        self.last_powered_on
    }

    /// Write one attribute. A refused write leaves the value as it was.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::Unknown`] for a name outside the
    /// registry, or [`AttributeError::Rejected`] for a value the
    /// constraint refuses.
    pub fn set_attribute(
        &mut self,
        name: &str,
        value: AttributeValue,
    ) -> Result<AttributeChange, AttributeError> {
        self.attributes.set_value(name, value)
    }

    /// Mark the device reachable. Safe to repeat.
    pub fn connect(&mut self) {
        self.online = OnlineState::Online;
    }

    /// Mark the device unreachable. Safe to repeat.
    pub fn disconnect(&mut self) {
        self.online = OnlineState::Offline;
    }

    /// Power the device on at `at`.
    ///
    /// Always restarts the open span: a second power-on without an
    /// intervening power-off moves the accounted start forward, and the
    /// earlier portion is not accounted.
    pub fn power_on(&mut self, at: Timestamp) {
        self.power = PowerState::Powered;
        self.last_powered_on = Some(at);
        self.ledger.record(UsageEventKind::PowerOn, at);
    }

    /// Power the device off at `at`.
    ///
    /// Commits the open span `[last power-on, at)` to the ledger when one
    /// exists and has positive length. Safe to repeat; the transition is
    /// recorded either way.
    pub fn power_off(&mut self, at: Timestamp) {
        if let Some(started) = self.last_powered_on.take() {
            if let Some(interval) = UsageInterval::new(started, at) {
                self.ledger.commit(interval);
            }
        }
        self.power = PowerState::Unpowered;
        self.ledger.record(UsageEventKind::PowerOff, at);
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    manufacturer: Option<String>,
    room_id: Option<RoomId>,
    kind: Option<DeviceKind>,
    connect_mode: Option<ConnectMode>,
    power_mode: Option<PowerMode>,
    power_draw_watts: Option<f64>,
    attributes: Vec<(String, AttributeSpec)>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    #[must_use]
    pub fn room_id(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn connect_mode(mut self, connect_mode: ConnectMode) -> Self {
        self.connect_mode = Some(connect_mode);
        self
    }

    #[must_use]
    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.power_mode = Some(power_mode);
        self
    }

    #[must_use]
    pub fn power_draw_watts(mut self, watts: f64) -> Self {
        self.power_draw_watts = Some(watts);
        self
    }

    /// Add an attribute on top of the kind's canned set. A name already
    /// present in the canned set is replaced.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, spec: AttributeSpec) -> Self {
        self.attributes.push((name.into(), spec));
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// The device starts offline and unpowered, with the attribute set of
    /// its kind extended by any builder-supplied specs.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::Validation`] if `name` is missing or empty,
    /// or the power draw is invalid.
    pub fn build(self) -> Result<Device, HestiaError> {
        let kind = self.kind.unwrap_or(DeviceKind::Custom);
        let mut attributes = kind.default_attributes()?;
        for (name, spec) in self.attributes {
            attributes.insert(name, spec);
        }
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            manufacturer: self.manufacturer,
            room_id: self.room_id,
            kind,
            connect_mode: self.connect_mode.unwrap_or_default(),
            power_mode: self.power_mode.unwrap_or_default(),
            power_draw_watts: self.power_draw_watts.unwrap_or_default(),
            online: OnlineState::default(),
            power: PowerState::default(),
            last_powered_on: None,
            attributes,
            ledger: UsageLedger::default(),
        };
        device.validate()?;
        Ok(device)
    }
}
