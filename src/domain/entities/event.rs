//! Outbox event entity and the payload written for created URLs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event type written when a URL mapping is created.
pub const URL_CREATED: &str = "URLCreated";

/// Current version of [`UrlCreatedPayload`].
pub const PAYLOAD_VERSION: u32 = 1;

/// Delivery state of an outbox event.
///
/// Events start as [`EventStatus::New`] and move to [`EventStatus::Done`]
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    New,
    Done,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::New => "new",
            EventStatus::Done => "done",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(EventStatus::New),
            "done" => Ok(EventStatus::Done),
            other => Err(format!("unknown event status '{other}'")),
        }
    }
}

/// A durable record of a state change awaiting delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxEvent {
    pub id: i64,
    pub event_type: String,
    pub payload: String,
    pub status: EventStatus,
    pub created_at: Option<NaiveDateTime>,
}

impl OutboxEvent {
    pub fn is_pending(&self) -> bool {
        self.status == EventStatus::New
    }
}

/// Payload of a [`URL_CREATED`] event.
///
/// Serialized as versioned JSON so consumers never have to parse free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlCreatedPayload {
    pub version: u32,
    pub id: i64,
    pub url: String,
    pub alias: String,
}

impl UrlCreatedPayload {
    pub fn new(id: i64, url: &str, alias: &str) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            id,
            url: url.to_string(),
            alias: alias.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_known_values() {
        assert_eq!("new".parse::<EventStatus>(), Ok(EventStatus::New));
        assert_eq!("done".parse::<EventStatus>(), Ok(EventStatus::Done));
        assert!("sent".parse::<EventStatus>().is_err());
    }

    #[test]
    fn test_status_display_matches_column_values() {
        assert_eq!(EventStatus::New.to_string(), "new");
        assert_eq!(EventStatus::Done.to_string(), "done");
    }

    #[test]
    fn test_payload_json_carries_version_and_fields() {
        let payload = UrlCreatedPayload::new(7, "https://example.com", "promo");
        let json = payload.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["id"], 7);
        assert_eq!(value["url"], "https://example.com");
        assert_eq!(value["alias"], "promo");
    }

    #[test]
    fn test_pending_event() {
        let event = OutboxEvent {
            id: 1,
            event_type: URL_CREATED.to_string(),
            payload: "{}".to_string(),
            status: EventStatus::New,
            created_at: None,
        };

        assert!(event.is_pending());
        assert!(
            !OutboxEvent {
                status: EventStatus::Done,
                ..event
            }
            .is_pending()
        );
    }
}
