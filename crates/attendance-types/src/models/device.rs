//! Biometric device records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capture modality of a biometric device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricType {
    Fingerprint,
    Face,
    Card,
    Iris,
}

impl std::fmt::Display for BiometricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fingerprint => write!(f, "fingerprint"),
            Self::Face => write!(f, "face"),
            Self::Card => write!(f, "card"),
            Self::Iris => write!(f, "iris"),
        }
    }
}

/// A registered biometric capture endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    /// Opaque device identifier (e.g. `BIO001`)
    pub id: String,
    /// Display name shown to operators
    pub name: String,
    /// Physical location label
    pub location: String,
    /// Capture modality
    pub biometric_type: BiometricType,
    /// Whether the device is currently connected and eligible for sync
    pub is_active: bool,
    /// Last successful contact (connect, configure or sync)
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
    /// Network address of the device bridge
    pub ip_address: String,
    /// TCP port of the device bridge
    pub port: u16,
}

impl Device {
    /// `ip:port` pair used by network links.
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip_address, self.port)
    }

    /// Merge the provided fields into this record.
    ///
    /// Fields left as `None` in the update are untouched.
    pub fn apply(&mut self, update: DeviceUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(biometric_type) = update.biometric_type {
            self.biometric_type = biometric_type;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(ip_address) = update.ip_address {
            self.ip_address = ip_address;
        }
        if let Some(port) = update.port {
            self.port = port;
        }
    }
}

/// Partial device fields accepted by `configure`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub biometric_type: Option<BiometricType>,
    pub is_active: Option<bool>,
    pub ip_address: Option<String>,
    pub port: Option<u16>,
}

impl DeviceUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Devices registered when no device list is configured.
///
/// Two entrance scanners are online; the library card reader starts offline.
pub fn default_devices() -> Vec<Device> {
    let now = Utc::now();
    vec![
        Device {
            id: "BIO001".to_string(),
            name: "Main Entrance Scanner".to_string(),
            location: "Main Gate".to_string(),
            biometric_type: BiometricType::Fingerprint,
            is_active: true,
            last_sync: Some(now),
            ip_address: "192.168.1.100".to_string(),
            port: 4370,
        },
        Device {
            id: "BIO002".to_string(),
            name: "Staff Room Face Reader".to_string(),
            location: "Staff Room".to_string(),
            biometric_type: BiometricType::Face,
            is_active: true,
            last_sync: Some(now),
            ip_address: "192.168.1.101".to_string(),
            port: 4370,
        },
        Device {
            id: "BIO003".to_string(),
            name: "Library Card Reader".to_string(),
            location: "Library".to_string(),
            biometric_type: BiometricType::Card,
            is_active: false,
            last_sync: None,
            ip_address: "192.168.1.102".to_string(),
            port: 4370,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let mut device = default_devices().remove(0);
        device.apply(DeviceUpdate {
            location: Some("North Gate".to_string()),
            port: Some(8080),
            ..Default::default()
        });

        assert_eq!(device.location, "North Gate");
        assert_eq!(device.port, 8080);
        assert_eq!(device.name, "Main Entrance Scanner");
        assert_eq!(device.address(), "192.168.1.100:8080");
    }

    #[test]
    fn test_default_devices_have_two_active() {
        let devices = default_devices();
        assert_eq!(devices.len(), 3);
        assert_eq!(devices.iter().filter(|d| d.is_active).count(), 2);
    }

    #[test]
    fn test_update_deserializes_partial_body() {
        let update: DeviceUpdate =
            serde_json::from_str(r#"{"biometric_type":"iris"}"#).unwrap();
        assert_eq!(update.biometric_type, Some(BiometricType::Iris));
        assert!(update.name.is_none());
        assert!(!update.is_empty());
        assert!(DeviceUpdate::default().is_empty());
    }
}
