//! Binary entrypoint for the terminal chat client.

use std::process::ExitCode;

use peerchat::start_chat_client;

/// Log in with the identity given as the first argument and join the relay.
fn main() -> ExitCode {
    start_chat_client::run()
}
