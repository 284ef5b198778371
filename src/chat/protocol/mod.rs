//! Wire protocol between the client and the relay.

pub mod inbound;
pub mod outbound;

pub use inbound::{DecodeError, InboundEvent, WireHistoryEntry};
pub use outbound::{FrameParseError, OutboundFrame};
