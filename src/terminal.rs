//! Line-oriented render surface for the terminal client.

use crate::chat::core::ids::PeerId;
use crate::chat::core::message::Direction;
use crate::chat::render::{Notice, RenderSurface, Roster, Theme, Transcript};

/// Draws chat state to stdout as plain lines.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    composer_enabled: Option<bool>,
}

impl TerminalSurface {
    /// New surface; the first composer state change is always announced.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            composer_enabled: None,
        }
    }
}

impl RenderSurface for TerminalSurface {
    fn show_roster(&mut self, roster: &Roster) {
        if roster.is_empty() {
            println!("-- no other users --");
            return;
        }
        println!("-- users --");
        for entry in roster.entries() {
            let status = if entry.online { "online" } else { "offline" };
            println!("  {} ({status})", entry.peer);
        }
    }

    fn show_transcript(&mut self, peer: &PeerId, transcript: &Transcript) {
        println!("== {peer} ==");
        for group in &transcript.groups {
            if let Some(label) = &group.label {
                println!("  --- {label} ---");
            }
            for message in &group.messages {
                let marker = match message.direction {
                    Direction::Sent => ">",
                    Direction::Received => "<",
                };
                println!("  [{}] {marker} {}", message.time, message.text);
            }
        }
    }

    fn clear_transcript(&mut self, local: &PeerId, peer: &PeerId) {
        println!("== {local} <-> {peer} (loading history) ==");
    }

    fn set_composer(&mut self, enabled: bool) {
        if self.composer_enabled != Some(enabled) {
            if enabled {
                println!("(type a message and press enter)");
            } else {
                println!("(open a conversation with /switch <peer> before typing)");
            }
        }
        self.composer_enabled = Some(enabled);
    }

    fn clear_composer(&mut self) {}

    fn notify(&mut self, notice: &Notice) {
        println!("! {notice}");
    }

    fn apply_theme(&mut self, theme: &Theme) {
        println!("(theme: {theme})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composer_state_tracks_session() {
        let mut surface = TerminalSurface::new();
        assert_eq!(surface.composer_enabled, None);

        surface.set_composer(false);
        assert_eq!(surface.composer_enabled, Some(false));
        surface.set_composer(true);
        surface.set_composer(true);
        assert_eq!(surface.composer_enabled, Some(true));
    }
}
