//! Date-grouped transcript projection.

use crate::chat::core::clock::parse_day_key;
use crate::chat::core::message::Message;

/// Label used for the current day.
pub const TODAY_LABEL: &str = "Today";

/// Format of separator labels for other days (`Mon Jan 01 2024`).
const DAY_LABEL_FORMAT: &str = "%a %b %d %Y";

/// A run of consecutive messages sharing a day key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateGroup {
    /// Day key shared by the messages (empty when undated).
    pub date: String,
    /// Separator text; `None` for a leading run of undated messages.
    pub label: Option<String>,
    /// Messages in conversation order.
    pub messages: Vec<Message>,
}

/// Displayable transcript for one conversation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Transcript {
    /// Groups in conversation order.
    pub groups: Vec<DateGroup>,
}

impl Transcript {
    /// Project `messages` into date groups.
    ///
    /// A separator opens whenever a dated message's day differs from the
    /// previous separator's day. Undated messages join the current group.
    #[must_use]
    pub fn project(messages: &[Message], today: &str) -> Self {
        let mut groups: Vec<DateGroup> = Vec::new();

        for message in messages {
            let opens_group = match groups.last() {
                None => true,
                Some(group) => !message.date.is_empty() && message.date != group.date,
            };

            if opens_group {
                let label = (!message.date.is_empty()).then(|| day_label(&message.date, today));
                groups.push(DateGroup {
                    date: message.date.clone(),
                    label,
                    messages: Vec::new(),
                });
            }

            if let Some(group) = groups.last_mut() {
                group.messages.push(message.clone());
            }
        }

        Self { groups }
    }

    /// Number of date separators shown.
    #[must_use]
    pub fn separator_count(&self) -> usize {
        self.groups.iter().filter(|g| g.label.is_some()).count()
    }

    /// Total number of messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.groups.iter().map(|g| g.messages.len()).sum()
    }

    /// Whether the transcript has no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Separator label for `date` relative to `today`; unparseable keys are shown verbatim.
#[must_use]
pub fn day_label(date: &str, today: &str) -> String {
    let Some(day) = parse_day_key(date) else {
        return date.to_string();
    };
    if parse_day_key(today) == Some(day) {
        TODAY_LABEL.to_string()
    } else {
        day.format(DAY_LABEL_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str) -> Message {
        Message::received("m", "10:00", date)
    }

    #[test]
    fn test_groups_by_day_in_order() {
        let transcript = Transcript::project(
            &[at("2024-01-01"), at("2024-01-01"), at("2024-01-02")],
            "2024-06-01",
        );
        assert_eq!(transcript.separator_count(), 2);
        assert_eq!(transcript.groups[0].date, "2024-01-01");
        assert_eq!(transcript.groups[0].messages.len(), 2);
        assert_eq!(transcript.groups[1].date, "2024-01-02");
        assert_eq!(transcript.message_count(), 3);
    }

    #[test]
    fn test_non_adjacent_repeat_opens_new_group() {
        let transcript = Transcript::project(
            &[at("2024-01-01"), at("2024-01-02"), at("2024-01-01")],
            "2024-06-01",
        );
        assert_eq!(transcript.separator_count(), 3);
    }

    #[test]
    fn test_labels() {
        assert_eq!(day_label("2024-06-01", "2024-06-01"), "Today");
        assert_eq!(day_label("2024-6-1", "2024-06-01"), "Today");
        assert_eq!(day_label("2024-01-01", "2024-06-01"), "Mon Jan 01 2024");
        assert_eq!(day_label("someday", "2024-06-01"), "someday");
    }

    #[test]
    fn test_undated_messages_join_current_group() {
        let transcript = Transcript::project(&[at(""), at("2024-01-01"), at("")], "2024-06-01");
        assert_eq!(transcript.groups.len(), 2);
        assert_eq!(transcript.groups[0].label, None);
        assert_eq!(transcript.groups[1].messages.len(), 2);
        assert_eq!(transcript.separator_count(), 1);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(Transcript::project(&[], "2024-06-01").is_empty());
    }
}
