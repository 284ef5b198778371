//! Startup helpers for the terminal chat client.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use crate::chat::core::clock::SystemClock;
use crate::chat::core::config::ClientConfig;
use crate::chat::core::ids::PeerId;
use crate::chat::session::SessionController;
use crate::chat::storage::{ChatStore, SqliteKeyValueStore};
use crate::client::{self, ChannelSink, SessionEnd, UserCommand};
use crate::terminal::TerminalSurface;

/// Environment variable naming the identity when none is given on the command line.
pub const ENV_USER: &str = "PEERCHAT_USER";

/// Run the client as `peerchat [identity]`.
///
/// # Returns
/// `ExitCode::SUCCESS` when the session ends normally, `1` on startup failure.
#[must_use]
pub fn run() -> ExitCode {
    let config = ClientConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting peerchat v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        return ExitCode::from(1);
    }

    let store = open_store(&config);

    let Some(username) = resolve_identity(std::env::args().nth(1), &store) else {
        tracing::error!("No identity given: pass one as the first argument or set {ENV_USER}");
        return ExitCode::from(1);
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    rt.block_on(run_client(&config, store, username))
}

/// Open the configured `SQLite` store, falling back to memory when it is unusable.
#[must_use]
pub fn open_store(config: &ClientConfig) -> ChatStore {
    match SqliteKeyValueStore::open(&config.storage) {
        Ok(backend) => {
            tracing::info!("Local state: {}", config.storage.sqlite_path.display());
            ChatStore::new(Arc::new(backend))
        }
        Err(e) => {
            tracing::warn!("Local state unavailable, nothing will survive this session: {e}");
            ChatStore::in_memory()
        }
    }
}

/// Pick the identity: argument, then `PEERCHAT_USER`, then the stored one.
#[must_use]
pub fn resolve_identity(arg: Option<String>, store: &ChatStore) -> Option<String> {
    arg.filter(|name| !name.trim().is_empty())
        .or_else(|| {
            std::env::var(ENV_USER)
                .ok()
                .filter(|name| !name.trim().is_empty())
        })
        .or_else(|| store.load_identity().map(PeerId::into_string))
}

async fn run_client(config: &ClientConfig, store: ChatStore, username: String) -> ExitCode {
    let (sink, frames) = ChannelSink::channel();
    let mut controller = match SessionController::login(
        &username,
        store,
        SystemClock,
        sink,
        TerminalSurface::new(),
    ) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!("Login failed: {e}");
            return ExitCode::from(1);
        }
    };

    let socket = match client::connect(config).await {
        Ok(socket) => socket,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {e}", config.relay_url);
            return ExitCode::from(1);
        }
    };

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<UserCommand>(64);
    tokio::spawn(async move {
        let stdin = tokio::io::stdin();
        let mut lines = tokio::io::BufReader::new(stdin).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            if cmd_tx.send(UserCommand::parse(&line)).await.is_err() {
                break;
            }
        }
    });

    match client::run_session(&mut controller, socket, frames, &mut cmd_rx).await {
        SessionEnd::Quit | SessionEnd::InputClosed => ExitCode::SUCCESS,
        SessionEnd::RelayClosed => {
            tracing::warn!("Relay closed the connection");
            ExitCode::SUCCESS
        }
    }
}
