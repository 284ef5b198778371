//! Output seam between the session controller and whatever draws the UI.

use std::fmt;

use crate::chat::core::errors::InputError;
use crate::chat::core::ids::PeerId;
use crate::chat::render::roster::Roster;
use crate::chat::render::theme::Theme;
use crate::chat::render::transcript::Transcript;

/// User-visible notice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notice {
    /// An action was rejected because of its input.
    Rejected(InputError),
    /// Connection state changed.
    Connection(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Connection(status) => f.write_str(status),
        }
    }
}

/// Something that displays chat state. Nothing drawn here feeds back into the session.
pub trait RenderSurface {
    /// Replace the peer list.
    fn show_roster(&mut self, roster: &Roster);
    /// Replace the visible transcript with the one for `peer`.
    fn show_transcript(&mut self, peer: &PeerId, transcript: &Transcript);
    /// Blank the transcript while the history for `peer` is awaited.
    fn clear_transcript(&mut self, local: &PeerId, peer: &PeerId);
    /// Enable or disable message composition.
    fn set_composer(&mut self, enabled: bool);
    /// Empty the message input.
    fn clear_composer(&mut self);
    /// Show a notice to the user.
    fn notify(&mut self, notice: &Notice);
    /// Apply a display theme.
    fn apply_theme(&mut self, theme: &Theme);
}
