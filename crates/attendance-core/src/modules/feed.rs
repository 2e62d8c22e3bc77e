//! Device event feeds.
//!
//! A feed is a point-in-time pull: each call returns the batch of raw capture
//! events the device currently holds, optionally limited to captures newer
//! than a caller-supplied watermark.

use std::time::Duration;

use async_trait::async_trait;
use attendance_types::{Device, DeviceError, EventOutcome, RawEvent, SubjectKind};
use chrono::{DateTime, SecondsFormat, Utc};

use super::link::device_url;

/// Source of raw attendance events for a device.
#[async_trait]
pub trait EventFeed: Send + Sync {
    /// `since` is the instant the previous successful fetch was issued, or
    /// `None` to ask for everything the device holds.
    async fn fetch_events(
        &self,
        device: &Device,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<RawEvent>, DeviceError>;
}

/// Roster every mocked device reports: two students and one teacher.
const MOCK_ROSTER: [(&str, SubjectKind); 3] = [
    ("STU001", SubjectKind::Student),
    ("STU002", SubjectKind::Student),
    ("TCH001", SubjectKind::Teacher),
];

/// Fixed three-event feed.
///
/// Subject ids are suffixed with the device id, so each device reports its
/// own cohort and two devices never write the same ledger row.
#[derive(Debug, Clone, Default)]
pub struct MockEventFeed {
    pinned_at: Option<DateTime<Utc>>,
}

impl MockEventFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every event at `at` instead of the current time.
    pub fn pinned(at: DateTime<Utc>) -> Self {
        Self { pinned_at: Some(at) }
    }

    pub fn batch_size(&self) -> usize {
        MOCK_ROSTER.len()
    }
}

#[async_trait]
impl EventFeed for MockEventFeed {
    async fn fetch_events(
        &self,
        device: &Device,
        _since: Option<DateTime<Utc>>,
    ) -> Result<Vec<RawEvent>, DeviceError> {
        let base = self.pinned_at.unwrap_or_else(Utc::now);
        let events = MOCK_ROSTER
            .iter()
            .zip(0i64..)
            .map(|(&(subject, kind), offset)| RawEvent {
                device_id: device.id.clone(),
                subject_id: format!("{subject}-{}", device.id),
                subject_kind: kind,
                timestamp: base + chrono::Duration::seconds(offset),
                outcome: EventOutcome::Success,
                biometric_data: None,
            })
            .collect();
        Ok(events)
    }
}

/// Feed that pulls `GET /events` from the device bridge.
///
/// With a watermark, `since=<rfc3339>` limits the batch to newer captures.
pub struct HttpEventFeed {
    client: reqwest::Client,
}

impl HttpEventFeed {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().connect_timeout(timeout).timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventFeed for HttpEventFeed {
    async fn fetch_events(
        &self,
        device: &Device,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<RawEvent>, DeviceError> {
        let feed_failed =
            |message: String| DeviceError::FeedFailed { id: device.id.clone(), message };

        let mut url = device_url(device, "events")?;
        if let Some(since) = since {
            url.query_pairs_mut()
                .append_pair("since", &since.to_rfc3339_opts(SecondsFormat::Secs, true));
        }

        let response = self.client.get(url).send().await.map_err(|e| feed_failed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(feed_failed(format!("bridge answered {status}")));
        }

        let events: Vec<RawEvent> =
            response.json().await.map_err(|e| feed_failed(format!("malformed batch: {e}")))?;
        tracing::debug!("[Feed] {} returned {} events", device.id, events.len());
        Ok(events)
    }
}
