//! Client-side conversation state machine.
//!
//! Organized into:
//! - `core`: Configuration, errors, identifiers, messages, and the clock
//! - `storage`: Durable key-value backends and typed access to persisted state
//! - `registry`: In-memory conversations with write-through persistence
//! - `protocol`: Inbound JSON events and outbound `|`-delimited frames
//! - `adapter`: Translation between protocol events and registry mutations
//! - `session`: Session context, controller, and the transport seam
//! - `render`: Roster, date-grouped transcript, and theme projections

pub mod adapter;
pub mod core;
pub mod protocol;
pub mod registry;
pub mod render;
pub mod session;
pub mod storage;

pub use adapter::{AdapterOutcome, ProtocolAdapter};
pub use self::core::{
    ChatError, ChatResult, ClientConfig, Clock, Direction, FixedClock, InputError, LocalIdentity,
    Message, PeerId, PeerIdError, StorageConfig, SystemClock,
};
pub use protocol::{InboundEvent, OutboundFrame};
pub use registry::{ConversationRegistry, HistoryEntry};
pub use render::{Notice, RenderSurface, Roster, RosterEntry, Theme, Transcript};
pub use session::{ChatState, FrameSink, RenderTarget, SessionContext, SessionController};
pub use storage::{ChatStore, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
