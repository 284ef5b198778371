//! Peer identifiers.
//!
//! The relay identifies every participant by a bare username string. The
//! same string travels inside `|`-delimited outbound frames, so a usable id
//! must never contain the delimiter.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors returned when parsing/validating a [`PeerId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerIdError {
    /// Empty (or whitespace-only) identifier.
    Empty,
    /// Exceeds the maximum accepted length.
    TooLong {
        /// Maximum allowed length.
        max: usize,
        /// Actual length received.
        got: usize,
    },
    /// Leading or trailing whitespace.
    SurroundingWhitespace,
    /// Contains the frame delimiter or a control character.
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// The index where it was found.
        index: usize,
    },
}

impl fmt::Display for PeerIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "peer id must not be empty"),
            Self::TooLong { max, got } => write!(f, "peer id too long: got {got}, max {max}"),
            Self::SurroundingWhitespace => {
                write!(f, "peer id must not start or end with whitespace")
            }
            Self::InvalidChar { ch, index } => {
                write!(f, "peer id contains invalid character {ch:?} at index {index}")
            }
        }
    }
}

impl std::error::Error for PeerIdError {}

/// Identifier of a chat participant (remote peer or the local user).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeerId(String);

/// The local user's identity shares the peer id rules.
pub type LocalIdentity = PeerId;

impl PeerId {
    /// Hard ceiling to prevent pathological payloads.
    pub const MAX_LEN: usize = 64;

    /// Build a validated `PeerId` from a name exactly as the relay spells it.
    ///
    /// Rules:
    /// - Not empty or whitespace-only.
    /// - No leading or trailing whitespace.
    /// - At most [`Self::MAX_LEN`] bytes.
    /// - No `|` (frame delimiter) and no control characters.
    ///
    /// # Errors
    /// Returns `PeerIdError` if the input is empty, padded, too long, or contains invalid characters.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PeerIdError> {
        let s = raw.as_ref();

        if s.trim().is_empty() {
            return Err(PeerIdError::Empty);
        }
        if s.trim() != s {
            return Err(PeerIdError::SurroundingWhitespace);
        }
        if s.len() > Self::MAX_LEN {
            return Err(PeerIdError::TooLong {
                max: Self::MAX_LEN,
                got: s.len(),
            });
        }
        if let Some((index, ch)) = s
            .chars()
            .enumerate()
            .find(|(_, ch)| *ch == '|' || ch.is_control())
        {
            return Err(PeerIdError::InvalidChar { ch, index });
        }

        Ok(Self(s.to_owned()))
    }

    /// Build a `PeerId` from text the local user typed, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// Same as [`Self::new`] on the trimmed input.
    pub fn from_input(raw: &str) -> Result<Self, PeerIdError> {
        Self::new(raw.trim())
    }

    /// Borrow as `&str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into `String`.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeerId {
    type Err = PeerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PeerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<PeerId> for String {
    fn from(value: PeerId) -> Self {
        value.into_string()
    }
}

impl TryFrom<String> for PeerId {
    type Error = PeerIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<str> for PeerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PeerId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
