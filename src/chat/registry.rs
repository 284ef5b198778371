//! In-memory conversation registry with write-through persistence.

use tracing::{debug, warn};

use crate::chat::core::ids::{LocalIdentity, PeerId};
use crate::chat::core::message::{Direction, Message};
use crate::chat::storage::{ChatStore, ConversationSnapshot};

/// A history entry before direction tagging: who wrote it, not which side.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HistoryEntry {
    /// Author username as reported by the relay.
    pub from: String,
    /// Message body.
    pub text: String,
    /// Displayable time of day.
    pub time: String,
    /// Calendar day key.
    pub date: String,
}

impl HistoryEntry {
    fn tag(self, local_identity: &LocalIdentity) -> Message {
        let direction = if local_identity == self.from.as_str() {
            Direction::Sent
        } else {
            Direction::Received
        };
        Message::new(self.text, direction, self.time, self.date)
    }
}

/// Peer to message-sequence map, kept equal to the persistent store after every mutation.
pub struct ConversationRegistry {
    conversations: ConversationSnapshot,
    store: ChatStore,
    local_identity: LocalIdentity,
    store_faults: u64,
}

impl ConversationRegistry {
    /// Empty registry bound to `store`. Nothing is read from the store.
    #[must_use]
    pub fn new(store: ChatStore, local_identity: LocalIdentity) -> Self {
        Self {
            conversations: ConversationSnapshot::new(),
            store,
            local_identity,
            store_faults: 0,
        }
    }

    /// Registry hydrated from the stored snapshot; absent or corrupt snapshots start empty.
    #[must_use]
    pub fn hydrate(store: ChatStore, local_identity: LocalIdentity) -> Self {
        let conversations = store.load_snapshot().unwrap_or_default();
        debug!(peers = conversations.len(), "hydrated conversation registry");
        Self {
            conversations,
            store,
            local_identity,
            store_faults: 0,
        }
    }

    /// Create an empty conversation for `peer` if none exists.
    ///
    /// Returns `true` when an entry was created.
    pub fn ensure(&mut self, peer: &PeerId) -> bool {
        if self.insert_if_missing(peer) {
            self.persist();
            true
        } else {
            false
        }
    }

    /// Append a message written by `peer`.
    pub fn append_received(&mut self, peer: &PeerId, message: Message) -> &[Message] {
        self.append(peer, message.with_direction(Direction::Received))
    }

    /// Append a message written by the local user to `peer` (optimistic echo).
    pub fn append_sent(&mut self, peer: &PeerId, message: Message) -> &[Message] {
        self.append(peer, message.with_direction(Direction::Sent))
    }

    /// Replace the whole sequence for `peer` with the relay's history.
    ///
    /// Entries authored by the local identity become `sent`, all others `received`.
    pub fn replace_history(&mut self, peer: &PeerId, entries: Vec<HistoryEntry>) -> &[Message] {
        let messages: Vec<Message> = entries
            .into_iter()
            .map(|entry| entry.tag(&self.local_identity))
            .collect();
        self.conversations.insert(peer.clone(), messages);
        self.persist();
        self.messages(peer)
    }

    /// Messages exchanged with `peer`, if the conversation exists.
    #[must_use]
    pub fn get(&self, peer: &PeerId) -> Option<&[Message]> {
        self.conversations.get(peer).map(Vec::as_slice)
    }

    /// Whether a conversation exists for `peer`.
    #[must_use]
    pub fn contains(&self, peer: &PeerId) -> bool {
        self.conversations.contains_key(peer)
    }

    /// Number of conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Whether the registry has no conversations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Borrow the full snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &ConversationSnapshot {
        &self.conversations
    }

    /// Number of store writes that failed this session.
    #[must_use]
    pub const fn store_faults(&self) -> u64 {
        self.store_faults
    }

    /// Identity used to tag history entries.
    #[must_use]
    pub const fn local_identity(&self) -> &LocalIdentity {
        &self.local_identity
    }

    fn append(&mut self, peer: &PeerId, message: Message) -> &[Message] {
        self.conversations
            .entry(peer.clone())
            .or_default()
            .push(message);
        self.persist();
        self.messages(peer)
    }

    fn insert_if_missing(&mut self, peer: &PeerId) -> bool {
        if self.conversations.contains_key(peer) {
            return false;
        }
        self.conversations.insert(peer.clone(), Vec::new());
        true
    }

    fn messages(&self, peer: &PeerId) -> &[Message] {
        self.conversations.get(peer).map_or(&[], Vec::as_slice)
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save_snapshot(&self.conversations) {
            self.store_faults += 1;
            warn!(
                faults = self.store_faults,
                "failed to persist conversations, keeping in-memory state: {err}"
            );
        }
    }
}
