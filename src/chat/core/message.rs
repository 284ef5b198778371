//! Message model for conversations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the conversation wrote a message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Written by the local user.
    Sent,
    /// Written by the peer.
    Received,
}

impl Direction {
    /// Stable string form for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single chat message. Immutable once created.
///
/// The serialized form keeps the direction under `type`, which is the layout
/// of the persisted conversation snapshot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message body.
    pub text: String,
    /// Sent or received.
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Displayable time of day (`HH:MM`).
    pub time: String,
    /// Calendar day key (`YYYY-MM-DD`).
    pub date: String,
}

impl Message {
    /// Build a message with an explicit direction.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        direction: Direction,
        time: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            direction,
            time: time.into(),
            date: date.into(),
        }
    }

    /// Build a message written by the local user.
    #[must_use]
    pub fn sent(text: impl Into<String>, time: impl Into<String>, date: impl Into<String>) -> Self {
        Self::new(text, Direction::Sent, time, date)
    }

    /// Build a message written by the peer.
    #[must_use]
    pub fn received(
        text: impl Into<String>,
        time: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self::new(text, Direction::Received, time, date)
    }

    /// Copy of this message with another direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_snapshot_layout() {
        let msg = Message::sent("hi", "10:00", "2024-01-01");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "hi",
                "type": "sent",
                "time": "10:00",
                "date": "2024-01-01"
            })
        );
    }
}
