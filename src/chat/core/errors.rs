//! Error types for the chat client.

use thiserror::Error;

/// Chat client error type.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A peer identifier failed validation.
    #[error("invalid peer id: {0}")]
    InvalidPeer(#[from] crate::chat::core::ids::PeerIdError),
    /// `SQLite` storage error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Socket transport error.
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
    /// The storage backend cannot be used (poisoned lock, closed handle).
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Convenience result alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Faults caused by user input. Rejected at the point of action, never mutate state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Login attempted with a blank username.
    #[error("enter a username")]
    EmptyIdentity,
    /// Username is not usable as a peer id.
    #[error("invalid username: {0}")]
    InvalidIdentity(crate::chat::core::ids::PeerIdError),
    /// Send attempted with blank text.
    #[error("message is empty")]
    EmptyMessage,
    /// Send attempted with no conversation selected.
    #[error("select a conversation first")]
    NoActiveChat,
    /// Switch attempted to an unusable peer id.
    #[error("invalid peer: {0}")]
    InvalidPeer(crate::chat::core::ids::PeerIdError),
}
