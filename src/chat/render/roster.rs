//! Peer list projection from roster events.

use std::collections::HashSet;

use tracing::warn;

use crate::chat::core::ids::{LocalIdentity, PeerId};

/// One row of the peer list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RosterEntry {
    /// The peer.
    pub peer: PeerId,
    /// Whether the relay reports the peer as connected.
    pub online: bool,
}

/// Ordered peer list, never containing the local identity.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Build the peer list from a roster event.
    ///
    /// Relay order is preserved. The local identity, invalid ids and repeats are dropped.
    #[must_use]
    pub fn from_event(all: &[String], online: &[String], identity: &LocalIdentity) -> Self {
        let online: HashSet<PeerId> = online.iter().filter_map(|raw| PeerId::new(raw).ok()).collect();
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(all.len());

        for raw in all {
            let peer = match PeerId::new(raw) {
                Ok(peer) => peer,
                Err(err) => {
                    warn!(raw = %raw, "skipping roster entry: {err}");
                    continue;
                }
            };
            if &peer == identity || !seen.insert(peer.clone()) {
                continue;
            }
            entries.push(RosterEntry {
                online: online.contains(&peer),
                peer,
            });
        }

        Self { entries }
    }

    /// Rows in display order.
    #[must_use]
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Whether `peer` is listed.
    #[must_use]
    pub fn contains(&self, peer: &PeerId) -> bool {
        self.entries.iter().any(|e| &e.peer == peer)
    }

    /// Whether `peer` is listed as online.
    #[must_use]
    pub fn is_online(&self, peer: &PeerId) -> bool {
        self.entries.iter().any(|e| &e.peer == peer && e.online)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_self_is_filtered_and_order_kept() {
        let me = PeerId::new("me").unwrap();
        let roster = Roster::from_event(
            &strings(&["bob", "me", "alice"]),
            &strings(&["alice", "me"]),
            &me,
        );
        let names: Vec<&str> = roster.entries().iter().map(|e| e.peer.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);
        assert!(!roster.contains(&me));
        assert!(roster.is_online(&PeerId::new("alice").unwrap()));
        assert!(!roster.is_online(&PeerId::new("bob").unwrap()));
    }

    #[test]
    fn test_invalid_and_duplicate_entries_dropped() {
        let me = PeerId::new("me").unwrap();
        let roster = Roster::from_event(&strings(&["bob", "", "x|y", "bob"]), &[], &me);
        assert_eq!(roster.len(), 1);
    }
}
