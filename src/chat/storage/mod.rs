//! Persistent store for conversations and session markers.

pub mod chat_store;
pub mod kv_store;

pub use chat_store::{ChatStore, ConversationSnapshot};
pub use kv_store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
