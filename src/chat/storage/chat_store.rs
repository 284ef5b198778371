//! Typed access to the persisted client state.
//!
//! Every load is forgiving: a backend error, a missing key and malformed
//! content all read as "absent" so that startup degrades to a cold start.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::chat::core::errors::ChatResult;
use crate::chat::core::ids::PeerId;
use crate::chat::core::message::Message;
use crate::chat::storage::kv_store::{KeyValueStore, MemoryKeyValueStore};

/// Full registry snapshot: peer to ordered message sequence.
pub type ConversationSnapshot = BTreeMap<PeerId, Vec<Message>>;

/// Key holding the registry snapshot.
pub const KEY_CHATS: &str = "chats";
/// Key holding the last active peer.
pub const KEY_ACTIVE_PEER: &str = "currentChatUser";
/// Key holding the local identity.
pub const KEY_IDENTITY: &str = "username";
/// Key holding the display theme.
pub const KEY_THEME: &str = "theme";

/// Shared handle on the persistent store.
#[derive(Clone)]
pub struct ChatStore {
    backend: Arc<dyn KeyValueStore>,
}

impl ChatStore {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store with no durability, for tests and degraded startup.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// Persist the registry snapshot.
    ///
    /// # Errors
    /// Returns an error if serialization or the backend write fails.
    pub fn save_snapshot(&self, snapshot: &ConversationSnapshot) -> ChatResult<()> {
        self.save_json(KEY_CHATS, snapshot)
    }

    /// Load the registry snapshot.
    #[must_use]
    pub fn load_snapshot(&self) -> Option<ConversationSnapshot> {
        self.load_json(KEY_CHATS)
    }

    /// Persist the active peer marker.
    ///
    /// # Errors
    /// Returns an error if the backend write fails.
    pub fn save_active_peer(&self, peer: &PeerId) -> ChatResult<()> {
        self.save_json(KEY_ACTIVE_PEER, peer)
    }

    /// Load the active peer marker.
    #[must_use]
    pub fn load_active_peer(&self) -> Option<PeerId> {
        self.load_json(KEY_ACTIVE_PEER)
    }

    /// Persist the local identity.
    ///
    /// # Errors
    /// Returns an error if the backend write fails.
    pub fn save_identity(&self, identity: &PeerId) -> ChatResult<()> {
        self.save_json(KEY_IDENTITY, identity)
    }

    /// Load the local identity.
    #[must_use]
    pub fn load_identity(&self) -> Option<PeerId> {
        self.load_json(KEY_IDENTITY)
    }

    /// Persist the theme class string.
    ///
    /// # Errors
    /// Returns an error if the backend write fails.
    pub fn save_theme(&self, theme: &str) -> ChatResult<()> {
        self.save_json(KEY_THEME, theme)
    }

    /// Load the theme class string.
    #[must_use]
    pub fn load_theme(&self) -> Option<String> {
        self.load_json(KEY_THEME)
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> ChatResult<()> {
        let json = serde_json::to_string(value)?;
        self.backend.save(key, &json)
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.load(key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key, "store read failed, treating as absent: {err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, "malformed stored value, treating as absent: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_roundtrip_keeps_order() {
        let store = ChatStore::in_memory();
        let mut snapshot = ConversationSnapshot::new();
        let bob = PeerId::new("bob").unwrap();
        snapshot.insert(
            bob.clone(),
            vec![
                Message::received("one", "10:00", "2024-01-01"),
                Message::sent("two", "10:01", "2024-01-01"),
            ],
        );

        store.save_snapshot(&snapshot).unwrap();
        let loaded = store.load_snapshot().unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded[&bob][1].text, "two");
    }

    #[test]
    fn test_malformed_snapshot_reads_as_absent() {
        let backend = Arc::new(MemoryKeyValueStore::new());
        backend.save(KEY_CHATS, "{not json").unwrap();
        let store = ChatStore::new(backend);
        assert!(store.load_snapshot().is_none());
    }

    #[test]
    fn test_snapshot_with_invalid_peer_reads_as_absent() {
        let backend = Arc::new(MemoryKeyValueStore::new());
        backend.save(KEY_CHATS, "{\"a|b\": []}").unwrap();
        let store = ChatStore::new(backend);
        assert!(store.load_snapshot().is_none());
    }

    #[test]
    fn test_identity_and_theme_keys_are_independent() {
        let store = ChatStore::in_memory();
        store.save_identity(&PeerId::new("me").unwrap()).unwrap();
        assert_eq!(store.load_identity().unwrap(), "me");
        assert_eq!(store.load_theme(), None);
        assert_eq!(store.load_active_peer(), None);
    }
}
