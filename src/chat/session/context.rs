//! Per-login session state: who we are and which conversation is open.

use std::fmt;

use crate::chat::core::errors::InputError;
use crate::chat::core::ids::{LocalIdentity, PeerId, PeerIdError};

/// Which conversation is open.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ChatState {
    /// Initial state; message composition disabled.
    #[default]
    NoActiveChat,
    /// A conversation is open; message composition enabled.
    ActiveChat(PeerId),
}

/// What the render surface should display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderTarget<'a> {
    /// No conversation; the composer must be disabled.
    None,
    /// The open conversation.
    Peer(&'a PeerId),
}

impl RenderTarget<'_> {
    /// Whether message composition is allowed.
    #[must_use]
    pub const fn composer_enabled(&self) -> bool {
        matches!(self, Self::Peer(_))
    }
}

impl fmt::Display for RenderTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Peer(peer) => write!(f, "{peer}"),
        }
    }
}

/// Session state built at login. The identity never changes afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionContext {
    local_identity: LocalIdentity,
    chat: ChatState,
}

impl SessionContext {
    /// Start a session for the username typed at login.
    ///
    /// # Errors
    /// Returns `InputError::EmptyIdentity` for blank input and
    /// `InputError::InvalidIdentity` for names the relay protocol cannot carry.
    pub fn login(username: &str) -> Result<Self, InputError> {
        let local_identity = PeerId::from_input(username).map_err(|err| match err {
            PeerIdError::Empty => InputError::EmptyIdentity,
            other => InputError::InvalidIdentity(other),
        })?;
        Ok(Self {
            local_identity,
            chat: ChatState::NoActiveChat,
        })
    }

    /// The logged-in user.
    #[must_use]
    pub const fn local_identity(&self) -> &LocalIdentity {
        &self.local_identity
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ChatState {
        &self.chat
    }

    /// The open conversation, if any.
    #[must_use]
    pub const fn active_peer(&self) -> Option<&PeerId> {
        match &self.chat {
            ChatState::NoActiveChat => None,
            ChatState::ActiveChat(peer) => Some(peer),
        }
    }

    /// Whether `peer` is the open conversation.
    #[must_use]
    pub fn is_active(&self, peer: &PeerId) -> bool {
        self.active_peer() == Some(peer)
    }

    /// Render target derived from the state.
    #[must_use]
    pub const fn render_target(&self) -> RenderTarget<'_> {
        match self.active_peer() {
            None => RenderTarget::None,
            Some(peer) => RenderTarget::Peer(peer),
        }
    }

    /// Open `peer`. Returns `false` when it is already open.
    pub(crate) fn activate(&mut self, peer: PeerId) -> bool {
        if self.is_active(&peer) {
            return false;
        }
        self.chat = ChatState::ActiveChat(peer);
        true
    }
}
