//! Client to relay frames.
//!
//! Outbound payloads are `|`-delimited plain text, not JSON.

use std::fmt;

use thiserror::Error;

use crate::chat::core::ids::{PeerId, PeerIdError};

/// Prefix of history request frames.
pub const HISTORY_PREFIX: &str = "HISTORY";
/// Prefix of message frames.
pub const TEXT_PREFIX: &str = "TO";
/// Field delimiter.
pub const DELIMITER: char = '|';

/// Errors raised while parsing an outbound frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameParseError {
    /// A `TO` frame without a text field.
    #[error("frame is missing its text field")]
    MissingText,
    /// The peer field is not a valid peer id.
    #[error("invalid peer in frame: {0}")]
    InvalidPeer(#[from] PeerIdError),
}

/// Frames sent from the client to the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Bare identity, sent once after the socket opens.
    Identify(PeerId),
    /// Ask for the full history with a peer.
    HistoryRequest(PeerId),
    /// Deliver text to a peer.
    Text {
        /// Recipient.
        to: PeerId,
        /// Message body; may itself contain the delimiter.
        text: String,
    },
}

impl OutboundFrame {
    /// Wire form of the frame.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Identify(identity) => identity.to_string(),
            Self::HistoryRequest(peer) => format!("{HISTORY_PREFIX}{DELIMITER}{peer}"),
            Self::Text { to, text } => format!("{TEXT_PREFIX}{DELIMITER}{to}{DELIMITER}{text}"),
        }
    }

    /// Parse a wire frame. Anything without a known prefix is an identity.
    ///
    /// # Errors
    /// Returns an error if the peer field is invalid or a `TO` frame lacks text.
    pub fn parse(raw: &str) -> Result<Self, FrameParseError> {
        let mut parts = raw.splitn(3, DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(HISTORY_PREFIX), Some(peer), None) => Ok(Self::HistoryRequest(PeerId::new(peer)?)),
            (Some(TEXT_PREFIX), Some(peer), Some(text)) => Ok(Self::Text {
                to: PeerId::new(peer)?,
                text: text.to_string(),
            }),
            (Some(TEXT_PREFIX), Some(_), None) => Err(FrameParseError::MissingText),
            _ => Ok(Self::Identify(PeerId::new(raw)?)),
        }
    }
}

impl fmt::Display for OutboundFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(name: &str) -> PeerId {
        PeerId::new(name).unwrap()
    }

    #[test]
    fn test_encode_frames() {
        assert_eq!(OutboundFrame::Identify(peer("me")).encode(), "me");
        assert_eq!(
            OutboundFrame::HistoryRequest(peer("bob")).encode(),
            "HISTORY|bob"
        );
        assert_eq!(
            OutboundFrame::Text {
                to: peer("carol"),
                text: "hi".to_string()
            }
            .to_string(),
            "TO|carol|hi"
        );
    }

    #[test]
    fn test_parse_keeps_delimiters_in_text() {
        let frame = OutboundFrame::parse("TO|carol|a|b").unwrap();
        assert_eq!(
            frame,
            OutboundFrame::Text {
                to: peer("carol"),
                text: "a|b".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_frames() {
        assert_eq!(
            OutboundFrame::parse("TO|carol"),
            Err(FrameParseError::MissingText)
        );
        assert!(OutboundFrame::parse("HISTORY|").is_err());
        assert!(OutboundFrame::parse("").is_err());
    }
}
