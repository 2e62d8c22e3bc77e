//! Raw capture events produced by device feeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who was captured by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Student,
    Teacher,
}

impl SubjectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device-side verdict for a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    Success,
    Failed,
    Duplicate,
}

/// One capture record returned by a device feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEvent {
    pub device_id: String,
    pub subject_id: String,
    pub subject_kind: SubjectKind,
    pub timestamp: DateTime<Utc>,
    pub outcome: EventOutcome,
    /// Opaque template or match data, base64 on the wire
    #[serde(default, with = "base64_bytes", skip_serializing_if = "Option::is_none")]
    pub biometric_data: Option<Vec<u8>>,
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biometric_payload_travels_as_base64() {
        let event = RawEvent {
            device_id: "BIO001".to_string(),
            subject_id: "STU001".to_string(),
            subject_kind: SubjectKind::Student,
            timestamp: Utc::now(),
            outcome: EventOutcome::Success,
            biometric_data: Some(vec![0xde, 0xad, 0xbe, 0xef]),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["biometric_data"], "3q2+7w==");
        assert_eq!(json["subject_kind"], "student");
    }

    #[test]
    fn test_missing_payload_is_none() {
        let json = r#"{
            "device_id": "BIO002",
            "subject_id": "TCH001",
            "subject_kind": "teacher",
            "timestamp": "2026-03-02T07:45:00Z",
            "outcome": "duplicate"
        }"#;
        let event: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.outcome, EventOutcome::Duplicate);
        assert!(event.biometric_data.is_none());
    }

    #[test]
    fn test_invalid_payload_is_rejected() {
        let json = r#"{
            "device_id": "BIO002",
            "subject_id": "TCH001",
            "subject_kind": "teacher",
            "timestamp": "2026-03-02T07:45:00Z",
            "outcome": "success",
            "biometric_data": "not base64!"
        }"#;
        assert!(serde_json::from_str::<RawEvent>(json).is_err());
    }
}
