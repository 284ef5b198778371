//! Relay client: socket transport, session loop and user commands.

pub mod commands;
/// TLS setup for `wss://` relays.
pub mod tls;
pub mod transport;

pub use commands::UserCommand;
pub use transport::{ChannelSink, RelaySocket, SessionEnd, connect, run_session};
