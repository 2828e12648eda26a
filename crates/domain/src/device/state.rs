//! Connectivity and power state of a device.

use serde::{Deserialize, Serialize};

/// Whether the device is reachable on the network.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnlineState {
    Online,
    #[default]
    Offline,
}

impl OnlineState {
    /// Whether the device is reachable.
    #[must_use]
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl std::fmt::Display for OnlineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// Whether the device is currently drawing power.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    Powered,
    #[default]
    Unpowered,
}

impl PowerState {
    /// Whether the device is drawing power.
    #[must_use]
    pub fn is_powered(&self) -> bool {
        matches!(self, Self::Powered)
    }
}

impl std::fmt::Display for PowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Powered => f.write_str("powered"),
            Self::Unpowered => f.write_str("unpowered"),
        }
    }
}

/// Physical link a device uses to join the network.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectMode {
    #[default]
    Wifi,
    Ethernet,
    Zigbee,
    Bluetooth,
}

impl std::fmt::Display for ConnectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wifi => f.write_str("wifi"),
            Self::Ethernet => f.write_str("ethernet"),
            Self::Zigbee => f.write_str("zigbee"),
            Self::Bluetooth => f.write_str("bluetooth"),
        }
    }
}

/// How a device is fed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerMode {
    #[default]
    Mains,
    Battery,
    Hybrid,
}

impl PowerMode {
    /// Whether mains consumption is accounted for this mode. Battery-only
    /// devices draw nothing from the mains.
    #[must_use]
    pub fn is_metered(&self) -> bool {
        !matches!(self, Self::Battery)
    }
}

impl std::fmt::Display for PowerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mains => f.write_str("mains"),
            Self::Battery => f.write_str("battery"),
            Self::Hybrid => f.write_str("hybrid"),
        }
    }
}
