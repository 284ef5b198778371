//! User commands typed into the terminal client.

/// One line of user input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UserCommand {
    /// `/switch <peer>`: open a conversation.
    Switch(String),
    /// `/peers`: redraw the peer list and open transcript.
    Peers,
    /// `/theme <name>`: change the display theme (`toggle` flips dark mode).
    Theme(String),
    /// `/quit`: end the session.
    Quit,
    /// Anything else: message text for the open conversation.
    Send(String),
}

impl UserCommand {
    /// Parse one input line. Unknown slash commands are sent as text.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let (head, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(head, rest)| (head, rest.trim()));

        match head {
            "/switch" | "/s" => Self::Switch(rest.to_string()),
            "/peers" => Self::Peers,
            "/theme" => Self::Theme(rest.to_string()),
            "/quit" | "/q" => Self::Quit,
            _ => Self::Send(line.to_string()),
        }
    }
}
