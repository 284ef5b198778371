//! Relay to client events.
//!
//! Inbound payloads are JSON objects discriminated by a `type` field.

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while decoding an inbound payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, or JSON with the wrong shape for its `type`.
    #[error("malformed inbound payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Events sent from the relay to the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Full roster and its online subset.
    Users {
        /// Every user known to the relay, in relay order.
        #[serde(default)]
        all: Vec<String>,
        /// Users currently connected.
        #[serde(default)]
        online: Vec<String>,
    },

    /// A live message addressed to the local user.
    Message {
        /// Author username.
        from: String,
        /// Message body.
        message: String,
        /// Displayable time of day.
        time: String,
        /// Calendar day key; older relays omit it.
        #[serde(default)]
        date: Option<String>,
    },

    /// Full history between the local user and one peer.
    History {
        /// The peer the history belongs to.
        with: String,
        /// Messages in relay order.
        #[serde(default)]
        messages: Vec<WireHistoryEntry>,
    },

    /// Any event type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// One entry of a history event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireHistoryEntry {
    /// Author username.
    pub from: String,
    /// Message body.
    pub text: String,
    /// Displayable time of day.
    pub time: String,
    /// Calendar day key, if the relay recorded one.
    #[serde(default)]
    pub date: Option<String>,
}

impl InboundEvent {
    /// Decode a raw text payload.
    ///
    /// # Errors
    /// Returns `DecodeError::Malformed` for non-JSON payloads, payloads
    /// without a string `type`, and known types with missing or mistyped fields.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Stable name of the event kind, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Users { .. } => "users",
            Self::Message { .. } => "message",
            Self::History { .. } => "history",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_users() {
        let event =
            InboundEvent::decode(r#"{"type":"users","all":["alice","bob"],"online":["alice"]}"#)
                .unwrap();
        assert_eq!(
            event,
            InboundEvent::Users {
                all: vec!["alice".to_string(), "bob".to_string()],
                online: vec!["alice".to_string()],
            }
        );
    }

    #[test]
    fn test_decode_message_without_date() {
        let event = InboundEvent::decode(
            r#"{"type":"message","from":"dave","message":"yo","time":"10:00"}"#,
        )
        .unwrap();
        assert!(matches!(event, InboundEvent::Message { date: None, .. }));
    }

    #[test]
    fn test_decode_history_ignores_extra_fields() {
        let event = InboundEvent::decode(
            r#"{"type":"history","with":"eve","messages":[
                {"from":"eve","text":"hey","time":"10:00","date":"2024-01-01","_id":"x"}
            ]}"#,
        )
        .unwrap();
        let InboundEvent::History { with, messages } = event else {
            panic!("expected history event");
        };
        assert_eq!(with, "eve");
        assert_eq!(messages[0].date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_unknown_type_is_not_an_error() {
        let event = InboundEvent::decode(r#"{"type":"typing","from":"bob"}"#).unwrap();
        assert_eq!(event, InboundEvent::Unknown);
    }

    #[test]
    fn test_malformed_payloads_fail_closed() {
        assert!(InboundEvent::decode("not json").is_err());
        assert!(InboundEvent::decode(r#"{"all":[]}"#).is_err());
        assert!(InboundEvent::decode(r#"{"type":"message","from":"bob"}"#).is_err());
        assert!(InboundEvent::decode(r#"{"type":"users","all":"bob"}"#).is_err());
    }
}
