//! Session controller: owns the session context and wires adapter, registry,
//! store, transport and render surface together.

use tracing::{debug, info, warn};

use crate::chat::adapter::{AdapterOutcome, ProtocolAdapter};
use crate::chat::core::clock::Clock;
use crate::chat::core::errors::InputError;
use crate::chat::core::ids::PeerId;
use crate::chat::protocol::{InboundEvent, OutboundFrame};
use crate::chat::registry::ConversationRegistry;
use crate::chat::render::{Notice, RenderSurface, Roster, Theme, Transcript};
use crate::chat::session::context::{RenderTarget, SessionContext};
use crate::chat::session::sink::FrameSink;
use crate::chat::storage::ChatStore;

/// Drives one logged-in session. Events are handled one at a time.
pub struct SessionController<C, T, R> {
    context: SessionContext,
    registry: ConversationRegistry,
    adapter: ProtocolAdapter<C>,
    store: ChatStore,
    roster: Roster,
    theme: Theme,
    last_active_peer: Option<PeerId>,
    sink: T,
    surface: R,
}

impl<C: Clock, T: FrameSink, R: RenderSurface> SessionController<C, T, R> {
    /// Log in as `username` and hydrate local state from `store`.
    ///
    /// The session starts with no open conversation. The peer that was open
    /// in the previous session is available through [`Self::last_active_peer`].
    ///
    /// # Errors
    /// Returns the input fault (also shown on `surface`) when the username is unusable.
    pub fn login(
        username: &str,
        store: ChatStore,
        clock: C,
        sink: T,
        mut surface: R,
    ) -> Result<Self, InputError> {
        let context = match SessionContext::login(username) {
            Ok(context) => context,
            Err(err) => {
                surface.notify(&Notice::Rejected(err.clone()));
                return Err(err);
            }
        };
        let identity = context.local_identity().clone();

        if let Err(err) = store.save_identity(&identity) {
            warn!("failed to persist identity: {err}");
        }

        let registry = ConversationRegistry::hydrate(store.clone(), identity.clone());
        let theme = store
            .load_theme()
            .map(|class| Theme::from_class(&class))
            .unwrap_or_default();
        let last_active_peer = store.load_active_peer().filter(|peer| peer != &identity);

        surface.apply_theme(&theme);
        surface.set_composer(false);

        info!(
            identity = %identity,
            conversations = registry.len(),
            "logged in"
        );

        Ok(Self {
            context,
            registry,
            adapter: ProtocolAdapter::new(clock),
            store,
            roster: Roster::default(),
            theme,
            last_active_peer,
            sink,
            surface,
        })
    }

    /// Send the identity announcement. Call once after the socket opens.
    pub fn announce(&mut self) {
        let frame = OutboundFrame::Identify(self.context.local_identity().clone());
        self.sink.send_frame(&frame);
    }

    /// Handle one raw payload from the relay. Malformed payloads change nothing.
    pub fn handle_frame(&mut self, raw: &str) -> AdapterOutcome {
        match InboundEvent::decode(raw) {
            Ok(event) => self.handle_event(event),
            Err(err) => {
                warn!("discarding inbound payload: {err}");
                AdapterOutcome::Ignored
            }
        }
    }

    /// Handle one decoded relay event.
    pub fn handle_event(&mut self, event: InboundEvent) -> AdapterOutcome {
        debug!(kind = event.kind(), "inbound event");
        let outcome = self.adapter.apply(event, &mut self.registry);

        match &outcome {
            AdapterOutcome::Roster(roster) => {
                self.roster = roster.clone();
                self.surface.show_roster(&self.roster);
            }
            AdapterOutcome::Appended { peer } => {
                if self.context.is_active(peer) {
                    self.render_active();
                }
            }
            AdapterOutcome::Replaced { peer } => {
                if self.context.is_active(peer) {
                    self.render_active();
                } else {
                    debug!(peer = %peer, "history reply for a conversation that is not open");
                }
            }
            AdapterOutcome::Ignored => {}
        }

        outcome
    }

    /// Open the conversation with `peer` and request its history.
    ///
    /// Switching to the already open peer does nothing.
    ///
    /// # Errors
    /// Returns `InputError::InvalidPeer` (also shown on the surface) for unusable ids.
    pub fn switch_to(&mut self, peer: &str) -> Result<(), InputError> {
        let peer = match PeerId::from_input(peer) {
            Ok(peer) => peer,
            Err(err) => return Err(self.reject(InputError::InvalidPeer(err))),
        };

        if !self.context.activate(peer.clone()) {
            debug!(peer = %peer, "already the open conversation");
            return Ok(());
        }

        self.registry.ensure(&peer);
        if let Err(err) = self.store.save_active_peer(&peer) {
            warn!("failed to persist active peer: {err}");
        }

        self.surface
            .clear_transcript(self.context.local_identity(), &peer);
        self.surface.set_composer(true);

        let frame = self.adapter.history_request(&peer);
        self.sink.send_frame(&frame);
        info!(peer = %peer, "switched conversation");
        Ok(())
    }

    /// Send `text` to the open conversation with optimistic local echo.
    ///
    /// The message is recorded before the frame is handed to the transport
    /// and is never rolled back.
    ///
    /// # Errors
    /// Returns `InputError::NoActiveChat` or `InputError::EmptyMessage`
    /// (also shown on the surface); nothing is recorded or sent.
    pub fn send_message(&mut self, text: &str) -> Result<(), InputError> {
        let Some(peer) = self.context.active_peer().cloned() else {
            return Err(self.reject(InputError::NoActiveChat));
        };
        let text = text.trim();
        if text.is_empty() {
            return Err(self.reject(InputError::EmptyMessage));
        }

        let (message, frame) = self.adapter.outgoing_text(&peer, text);
        self.registry.append_sent(&peer, message);
        self.sink.send_frame(&frame);
        self.surface.clear_composer();
        self.render_active();
        Ok(())
    }

    /// Change and persist the display theme.
    pub fn set_theme(&mut self, theme: Theme) {
        if let Err(err) = self.store.save_theme(theme.class()) {
            warn!("failed to persist theme: {err}");
        }
        self.surface.apply_theme(&theme);
        self.theme = theme;
    }

    /// What the render surface should show.
    #[must_use]
    pub const fn current_render_target(&self) -> RenderTarget<'_> {
        self.context.render_target()
    }

    /// Session state.
    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Conversation registry.
    #[must_use]
    pub const fn registry(&self) -> &ConversationRegistry {
        &self.registry
    }

    /// Latest peer list.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Current display theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Peer that was open when the previous session ended.
    #[must_use]
    pub const fn last_active_peer(&self) -> Option<&PeerId> {
        self.last_active_peer.as_ref()
    }

    /// Transport handle.
    #[must_use]
    pub const fn sink(&self) -> &T {
        &self.sink
    }

    /// Render surface.
    #[must_use]
    pub const fn surface(&self) -> &R {
        &self.surface
    }

    /// Mutable render surface, for notices raised outside the session.
    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    /// Redraw the peer list and the open transcript.
    pub fn refresh(&mut self) {
        self.surface.show_roster(&self.roster);
        self.render_active();
    }

    fn render_active(&mut self) {
        let Some(peer) = self.context.active_peer() else {
            return;
        };
        let messages = self.registry.get(peer).unwrap_or_default();
        let transcript = Transcript::project(messages, &self.adapter.clock().today());
        self.surface.show_transcript(peer, &transcript);
    }

    fn reject(&mut self, err: InputError) -> InputError {
        debug!("rejected user input: {err}");
        self.surface.notify(&Notice::Rejected(err.clone()));
        err
    }
}
