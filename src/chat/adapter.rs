//! Protocol adapter: inbound relay events to registry mutations, user intents to frames.

use tracing::{debug, warn};

use crate::chat::core::clock::Clock;
use crate::chat::core::ids::PeerId;
use crate::chat::core::message::Message;
use crate::chat::protocol::{InboundEvent, OutboundFrame, WireHistoryEntry};
use crate::chat::registry::{ConversationRegistry, HistoryEntry};
use crate::chat::render::Roster;

/// What an inbound event changed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AdapterOutcome {
    /// A roster event produced a new peer list.
    Roster(Roster),
    /// A live message was appended to `peer`'s conversation.
    Appended {
        /// Conversation that grew.
        peer: PeerId,
    },
    /// `peer`'s conversation was replaced by a history sync.
    Replaced {
        /// Conversation that was replaced.
        peer: PeerId,
    },
    /// Nothing changed.
    Ignored,
}

/// Translates between the wire protocol and registry mutations.
pub struct ProtocolAdapter<C> {
    clock: C,
}

impl<C: Clock> ProtocolAdapter<C> {
    /// Adapter stamping fallback dates and times from `clock`.
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Clock used for stamping.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Apply one inbound event to the registry.
    pub fn apply(&self, event: InboundEvent, registry: &mut ConversationRegistry) -> AdapterOutcome {
        match event {
            InboundEvent::Users { all, online } => {
                let roster = Roster::from_event(&all, &online, registry.local_identity());
                for entry in roster.entries() {
                    registry.ensure(&entry.peer);
                }
                debug!(peers = roster.len(), "roster updated");
                AdapterOutcome::Roster(roster)
            }
            InboundEvent::Message {
                from,
                message,
                time,
                date,
            } => {
                let Some(peer) = valid_peer(&from, "message") else {
                    return AdapterOutcome::Ignored;
                };
                let date = self.date_or_today(date);
                let len = registry
                    .append_received(&peer, Message::received(message, time, date))
                    .len();
                debug!(peer = %peer, len, "live message appended");
                AdapterOutcome::Appended { peer }
            }
            InboundEvent::History { with, messages } => {
                let Some(peer) = valid_peer(&with, "history") else {
                    return AdapterOutcome::Ignored;
                };
                let entries = messages
                    .into_iter()
                    .map(|entry| self.history_entry(entry))
                    .collect();
                let len = registry.replace_history(&peer, entries).len();
                debug!(peer = %peer, len, "history replaced");
                AdapterOutcome::Replaced { peer }
            }
            InboundEvent::Unknown => {
                debug!("ignoring unknown inbound event type");
                AdapterOutcome::Ignored
            }
        }
    }

    /// Frame asking the relay for the full history with `peer`.
    #[must_use]
    pub fn history_request(&self, peer: &PeerId) -> OutboundFrame {
        OutboundFrame::HistoryRequest(peer.clone())
    }

    /// Optimistic local message and the frame delivering it to `peer`.
    #[must_use]
    pub fn outgoing_text(&self, peer: &PeerId, text: &str) -> (Message, OutboundFrame) {
        let message = Message::sent(text, self.clock.time_of_day(), self.clock.today());
        let frame = OutboundFrame::Text {
            to: peer.clone(),
            text: text.to_string(),
        };
        (message, frame)
    }

    fn date_or_today(&self, date: Option<String>) -> String {
        date.filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.clock.today())
    }

    fn history_entry(&self, entry: WireHistoryEntry) -> HistoryEntry {
        HistoryEntry {
            from: entry.from,
            text: entry.text,
            time: entry.time,
            date: self.date_or_today(entry.date),
        }
    }
}

fn valid_peer(raw: &str, kind: &str) -> Option<PeerId> {
    match PeerId::new(raw) {
        Ok(peer) => Some(peer),
        Err(err) => {
            warn!(kind, raw = %raw, "discarding event with invalid peer: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::chat::core::clock::FixedClock;
    use crate::chat::core::message::Direction;
    use crate::chat::storage::ChatStore;

    fn peer(name: &str) -> PeerId {
        PeerId::new(name).unwrap()
    }

    fn setup() -> (ProtocolAdapter<FixedClock>, ConversationRegistry) {
        let clock = FixedClock::at(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 12, 30);
        let registry = ConversationRegistry::new(ChatStore::in_memory(), peer("me"));
        (ProtocolAdapter::new(clock), registry)
    }

    fn decode(raw: &str) -> InboundEvent {
        InboundEvent::decode(raw).unwrap()
    }

    #[test]
    fn test_roster_ensures_everyone_but_self() {
        let (adapter, mut registry) = setup();
        let outcome = adapter.apply(
            decode(r#"{"type":"users","all":["alice","me","bob"],"online":["alice"]}"#),
            &mut registry,
        );
        assert!(matches!(outcome, AdapterOutcome::Roster(ref r) if r.len() == 2));
        assert!(registry.contains(&peer("alice")));
        assert!(registry.contains(&peer("bob")));
        assert!(!registry.contains(&peer("me")));
    }

    #[test]
    fn test_live_message_without_date_uses_clock() {
        let (adapter, mut registry) = setup();
        adapter.apply(
            decode(r#"{"type":"message","from":"dave","message":"yo","time":"08:00"}"#),
            &mut registry,
        );
        let seq = registry.get(&peer("dave")).unwrap();
        assert_eq!(seq, &[Message::received("yo", "08:00", "2024-06-01")]);
    }

    #[test]
    fn test_live_message_appends_without_reordering() {
        let (adapter, mut registry) = setup();
        registry.append_sent(&peer("dave"), Message::sent("first", "07:00", "2024-06-01"));
        let outcome = adapter.apply(
            decode(r#"{"type":"message","from":"dave","message":"second","time":"08:00","date":"2024-05-31"}"#),
            &mut registry,
        );
        assert_eq!(outcome, AdapterOutcome::Appended { peer: peer("dave") });
        let seq = registry.get(&peer("dave")).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[0].text, "first");
        assert_eq!(seq[1].date, "2024-05-31");
    }

    #[test]
    fn test_history_translates_origin() {
        let (adapter, mut registry) = setup();
        adapter.apply(
            decode(
                r#"{"type":"history","with":"eve","messages":[
                    {"from":"eve","text":"hey","time":"10:00","date":"2024-01-01"},
                    {"from":"me","text":"hi","time":"10:01"}
                ]}"#,
            ),
            &mut registry,
        );
        let seq = registry.get(&peer("eve")).unwrap();
        assert_eq!(seq[0].direction, Direction::Received);
        assert_eq!(seq[1].direction, Direction::Sent);
        assert_eq!(seq[1].date, "2024-06-01");
    }

    #[test]
    fn test_invalid_peer_events_are_discarded() {
        let (adapter, mut registry) = setup();
        let outcome = adapter.apply(
            decode(r#"{"type":"message","from":"","message":"x","time":"08:00"}"#),
            &mut registry,
        );
        assert_eq!(outcome, AdapterOutcome::Ignored);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_padded_relay_names_are_not_renamed() {
        let (adapter, mut registry) = setup();
        let outcome = adapter.apply(
            decode(r#"{"type":"users","all":["bob ","carol"],"online":["bob "]}"#),
            &mut registry,
        );
        assert!(matches!(outcome, AdapterOutcome::Roster(ref r) if r.len() == 1));
        assert!(!registry.contains(&peer("bob")));

        let outcome = adapter.apply(
            decode(r#"{"type":"message","from":"bob ","message":"x","time":"08:00"}"#),
            &mut registry,
        );
        assert_eq!(outcome, AdapterOutcome::Ignored);
        assert!(!registry.contains(&peer("bob")));
    }

    #[test]
    fn test_unknown_event_is_noop() {
        let (adapter, mut registry) = setup();
        assert_eq!(
            adapter.apply(InboundEvent::Unknown, &mut registry),
            AdapterOutcome::Ignored
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_outgoing_text_is_stamped() {
        let (adapter, _) = setup();
        let (message, frame) = adapter.outgoing_text(&peer("carol"), "hi");
        assert_eq!(message, Message::sent("hi", "12:30", "2024-06-01"));
        assert_eq!(frame.encode(), "TO|carol|hi");
    }
}
