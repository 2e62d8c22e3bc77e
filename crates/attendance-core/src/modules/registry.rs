//! Device Registry.
//!
//! Owns the set of known biometric devices and their connectivity state. All
//! mutations go through the registry; devices are seeded once and never
//! removed.

use std::sync::Arc;
use std::time::Duration;

use attendance_types::{Device, DeviceError, DeviceUpdate};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::link::DeviceLink;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DeviceRegistry {
    devices: RwLock<Vec<Device>>,
    link: Arc<dyn DeviceLink>,
    connect_timeout: Duration,
}

impl DeviceRegistry {
    pub fn new(devices: Vec<Device>, link: Arc<dyn DeviceLink>) -> Self {
        Self { devices: RwLock::new(devices), link, connect_timeout: DEFAULT_CONNECT_TIMEOUT }
    }

    /// Bound every handshake; a link that takes longer counts as unreachable.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// All devices in registration order.
    pub async fn list(&self) -> Vec<Device> {
        self.devices.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Result<Device, DeviceError> {
        self.devices
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| DeviceError::NotFound { id: id.to_string() })
    }

    /// Active devices in registration order.
    pub async fn active_devices(&self) -> Vec<Device> {
        self.devices.read().await.iter().filter(|d| d.is_active).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.devices.read().await.is_empty()
    }

    /// Handshake with the device.
    ///
    /// Success marks it active and stamps `last_sync`; failure marks it
    /// inactive and returns the link error.
    pub async fn connect(&self, id: &str) -> Result<bool, DeviceError> {
        let device = self.get(id).await?;

        match self.handshake(&device).await {
            Ok(()) => {
                self.update(id, |d| {
                    d.is_active = true;
                    d.last_sync = Some(Utc::now());
                })
                .await?;
                info!(
                    "[Registry] Connected to {} ({}) via {} link",
                    device.name,
                    id,
                    self.link.name()
                );
                Ok(true)
            },
            Err(err) => {
                self.update(id, |d| d.is_active = false).await?;
                warn!("[Registry] Connection to {} failed: {}", id, err);
                Err(err)
            },
        }
    }

    pub async fn disconnect(&self, id: &str) -> Result<bool, DeviceError> {
        self.update(id, |d| d.is_active = false).await?;
        info!("[Registry] Disconnected {}", id);
        Ok(true)
    }

    /// Merge `update` into the device record and restamp `last_sync`.
    pub async fn configure(&self, id: &str, update: DeviceUpdate) -> Result<bool, DeviceError> {
        self.update(id, |d| {
            d.apply(update);
            d.last_sync = Some(Utc::now());
        })
        .await?;
        info!("[Registry] Reconfigured {}", id);
        Ok(true)
    }

    /// Health check: same handshake as `connect`, but never fails and never
    /// changes device state. Unknown ids report `false`.
    pub async fn test_connection(&self, id: &str) -> bool {
        let Ok(device) = self.get(id).await else {
            return false;
        };
        match self.handshake(&device).await {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!("[Registry] Connection test for {} failed: {}", id, err);
                false
            },
        }
    }

    pub async fn mark_synced(&self, id: &str, at: DateTime<Utc>) -> Result<(), DeviceError> {
        self.update(id, |d| d.last_sync = Some(at)).await.map(|_| ())
    }

    async fn handshake(&self, device: &Device) -> Result<(), DeviceError> {
        match tokio::time::timeout(self.connect_timeout, self.link.connect(device)).await {
            Ok(result) => result,
            Err(_) => Err(DeviceError::ConnectionFailed {
                id: device.id.clone(),
                message: format!("no response within {}s", self.connect_timeout.as_secs_f64()),
            }),
        }
    }

    async fn update<F>(&self, id: &str, mutate: F) -> Result<Device, DeviceError>
    where
        F: FnOnce(&mut Device),
    {
        let mut devices = self.devices.write().await;
        let device = devices
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DeviceError::NotFound { id: id.to_string() })?;
        mutate(device);
        Ok(device.clone())
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
