//! Core chat types and identifiers.

pub mod clock;
pub mod config;
pub mod errors;
pub mod ids;
pub mod message;

pub use clock::{Clock, FixedClock, SystemClock, parse_day_key};
pub use config::{ClientConfig, StorageConfig};
pub use errors::{ChatError, ChatResult, InputError};
pub use ids::{LocalIdentity, PeerId, PeerIdError};
pub use message::{Direction, Message};
