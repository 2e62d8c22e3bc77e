//! Device link capability.
//!
//! The registry never talks to hardware directly; it goes through a
//! [`DeviceLink`]. Two links exist:
//!
//! - [`SimulatedLink`] waits a fixed delay and fails for a configured set of
//!   device ids. It performs no I/O and is what tests run against.
//! - [`HttpDeviceLink`] asks the device bridge at `http://{ip}:{port}/status`.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use attendance_types::models::LinkConfig;
use attendance_types::{Device, DeviceError};
use url::Url;

/// Establishes (or tests) a connection to a single device.
#[async_trait]
pub trait DeviceLink: Send + Sync {
    /// Perform the handshake. `Ok(())` means the device answered.
    async fn connect(&self, device: &Device) -> Result<(), DeviceError>;

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}

/// Fixed-delay link with hard-wired unreachable devices.
pub struct SimulatedLink {
    delay: Duration,
    unreachable: HashSet<String>,
}

impl SimulatedLink {
    pub fn new<I, S>(delay: Duration, unreachable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { delay, unreachable: unreachable.into_iter().map(Into::into).collect() }
    }

    pub fn from_config(config: &LinkConfig) -> Self {
        Self::new(
            Duration::from_millis(config.connect_delay_ms),
            config.unreachable_device_ids.iter().cloned(),
        )
    }

    /// Zero-delay link; every device in `unreachable` fails.
    pub fn instant<I, S>(unreachable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Duration::ZERO, unreachable)
    }

    pub fn is_unreachable(&self, device_id: &str) -> bool {
        self.unreachable.contains(device_id)
    }
}

#[async_trait]
impl DeviceLink for SimulatedLink {
    async fn connect(&self, device: &Device) -> Result<(), DeviceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.is_unreachable(&device.id) {
            return Err(DeviceError::ConnectionFailed {
                id: device.id.clone(),
                message: format!("no response from {}", device.address()),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// Link that checks the HTTP bridge in front of a device.
pub struct HttpDeviceLink {
    client: reqwest::Client,
}

impl HttpDeviceLink {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().connect_timeout(timeout).timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeviceLink for HttpDeviceLink {
    async fn connect(&self, device: &Device) -> Result<(), DeviceError> {
        let url = device_url(device, "status")?;
        let connection_failed = |message: String| DeviceError::ConnectionFailed {
            id: device.id.clone(),
            message,
        };

        let response =
            self.client.get(url).send().await.map_err(|e| connection_failed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(connection_failed(format!("bridge answered {status}")));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Resolve `path` against the device bridge base URL.
pub(crate) fn device_url(device: &Device, path: &str) -> Result<Url, DeviceError> {
    let invalid = |e: url::ParseError| DeviceError::ConnectionFailed {
        id: device.id.clone(),
        message: format!("invalid device address {}: {e}", device.address()),
    };
    Url::parse(&format!("http://{}/", device.address()))
        .and_then(|base| base.join(path))
        .map_err(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendance_types::models::default_devices;

    #[tokio::test]
    async fn test_simulated_link_fails_only_unreachable_devices() {
        let link = SimulatedLink::instant(["BIO003"]);
        let devices = default_devices();

        assert!(link.connect(&devices[0]).await.is_ok());
        assert!(link.connect(&devices[1]).await.is_ok());
        match link.connect(&devices[2]).await {
            Err(DeviceError::ConnectionFailed { id, .. }) => assert_eq!(id, "BIO003"),
            other => panic!("expected connection failure, got {other:?}"),
        }
    }

    #[test]
    fn test_from_config_uses_configured_ids() {
        let link = SimulatedLink::from_config(&LinkConfig::default());
        assert!(link.is_unreachable("BIO003"));
        assert!(!link.is_unreachable("BIO001"));
        assert_eq!(link.delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_device_url() {
        let device = default_devices().remove(0);
        let url = device_url(&device, "events").unwrap();
        assert_eq!(url.as_str(), "http://192.168.1.100:4370/events");
    }

    #[test]
    fn test_device_url_rejects_garbage_address() {
        let mut device = default_devices().remove(0);
        device.ip_address = "not a host".to_string();
        assert!(device_url(&device, "status").is_err());
    }
}
