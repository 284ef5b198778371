//! Recording doubles for session tests.

use crate::chat::core::ids::PeerId;
use crate::chat::render::{Notice, RenderSurface, Roster, Theme, Transcript};

/// Everything a surface was asked to do, in order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SurfaceCall {
    Roster(Roster),
    Transcript(PeerId, Transcript),
    Clear(PeerId),
    Composer(bool),
    ClearComposer,
    Notice(Notice),
    Theme(Theme),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn transcripts(&self) -> Vec<&PeerId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Transcript(peer, _) => Some(peer),
                _ => None,
            })
            .collect()
    }

    pub fn last_transcript(&self) -> Option<&Transcript> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::Transcript(_, t) => Some(t),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<&Notice> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Notice(n) => Some(n),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn show_roster(&mut self, roster: &Roster) {
        self.calls.push(SurfaceCall::Roster(roster.clone()));
    }

    fn show_transcript(&mut self, peer: &PeerId, transcript: &Transcript) {
        self.calls
            .push(SurfaceCall::Transcript(peer.clone(), transcript.clone()));
    }

    fn clear_transcript(&mut self, _local: &PeerId, peer: &PeerId) {
        self.calls.push(SurfaceCall::Clear(peer.clone()));
    }

    fn set_composer(&mut self, enabled: bool) {
        self.calls.push(SurfaceCall::Composer(enabled));
    }

    fn clear_composer(&mut self) {
        self.calls.push(SurfaceCall::ClearComposer);
    }

    fn notify(&mut self, notice: &Notice) {
        self.calls.push(SurfaceCall::Notice(notice.clone()));
    }

    fn apply_theme(&mut self, theme: &Theme) {
        self.calls.push(SurfaceCall::Theme(theme.clone()));
    }
}
