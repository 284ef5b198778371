//! Relay connection and the single-task session loop.

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::chat::core::clock::Clock;
use crate::chat::core::config::ClientConfig;
use crate::chat::core::errors::ChatResult;
use crate::chat::protocol::OutboundFrame;
use crate::chat::render::{Notice, RenderSurface, Theme};
use crate::chat::session::{FrameSink, SessionController};
use crate::client::commands::UserCommand;
use crate::client::tls::init_rustls_crypto_provider;

/// Socket type returned by [`connect`].
pub type RelaySocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Open the socket to the configured relay.
///
/// # Errors
/// Returns an error if the URL is invalid or the handshake fails.
pub async fn connect(config: &ClientConfig) -> ChatResult<RelaySocket> {
    config.validate()?;
    init_rustls_crypto_provider();
    let (socket, response) = connect_async(config.relay_url.as_str()).await?;
    info!(
        relay = %config.relay_url,
        status = %response.status(),
        "connected to relay"
    );
    Ok(socket)
}

/// Frame sink feeding the socket writer task.
///
/// Frames queued after the writer stopped are dropped; there is no retry.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<OutboundFrame>,
}

impl ChannelSink {
    /// Sink and the receiver the writer task drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FrameSink for ChannelSink {
    fn send_frame(&mut self, frame: &OutboundFrame) {
        if self.tx.send(frame.clone()).is_err() {
            debug!(frame = %frame, "connection closed, dropping frame");
        }
    }
}

/// Why the session loop stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionEnd {
    /// The user asked to quit.
    Quit,
    /// The relay closed the socket or it failed.
    RelayClosed,
    /// The command source went away.
    InputClosed,
}

/// Run one session over `socket` until the relay, the user or the input ends it.
///
/// The identity is announced first. Relay events and user commands are
/// handled one at a time, in arrival order, on the calling task; only the
/// socket writes happen on a separate writer task.
pub async fn run_session<C, R, S>(
    controller: &mut SessionController<C, ChannelSink, R>,
    socket: WebSocketStream<S>,
    mut frames: mpsc::UnboundedReceiver<OutboundFrame>,
    commands: &mut mpsc::Receiver<UserCommand>,
) -> SessionEnd
where
    C: Clock,
    R: RenderSurface,
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut write, mut read) = socket.split();

    let writer = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            if let Err(err) = write.send(WsMessage::Text(frame.encode().into())).await {
                debug!("socket write failed, stopping writer: {err}");
                break;
            }
        }
    });

    controller.announce();
    let reopen = controller
        .last_active_peer()
        .cloned()
        .map(|peer| controller.switch_to(peer.as_str()));
    if let Some(Err(err)) = reopen {
        debug!("could not reopen last conversation: {err}");
    }

    let end = loop {
        tokio::select! {
            inbound = read.next() => match inbound {
                Some(Ok(WsMessage::Text(text))) => {
                    controller.handle_frame(text.as_str());
                }
                Some(Ok(WsMessage::Close(_))) | None => break SessionEnd::RelayClosed,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!("relay socket error: {err}");
                    break SessionEnd::RelayClosed;
                }
            },
            command = commands.recv() => match command {
                None => break SessionEnd::InputClosed,
                Some(UserCommand::Quit) => break SessionEnd::Quit,
                Some(command) => apply_command(controller, command),
            },
        }
    };

    if end == SessionEnd::RelayClosed {
        controller
            .surface_mut()
            .notify(&Notice::Connection("disconnected from relay".to_string()));
    }
    writer.abort();
    info!(?end, "session ended");
    end
}

fn apply_command<C, T, R>(controller: &mut SessionController<C, T, R>, command: UserCommand)
where
    C: Clock,
    T: FrameSink,
    R: RenderSurface,
{
    let result = match command {
        UserCommand::Switch(peer) => controller.switch_to(&peer),
        UserCommand::Send(text) => controller.send_message(&text),
        UserCommand::Peers => {
            controller.refresh();
            Ok(())
        }
        UserCommand::Theme(choice) => {
            let theme = if choice.eq_ignore_ascii_case("toggle") {
                controller.theme().toggled_dark()
            } else {
                Theme::from_choice(&choice)
            };
            controller.set_theme(theme);
            Ok(())
        }
        UserCommand::Quit => Ok(()),
    };

    if let Err(err) = result {
        debug!("command rejected: {err}");
    }
}
