//! Display theme preference.

use std::fmt;

/// Class string of the dark theme.
const DARK: &str = "dark";

/// Display theme. Persisted as the class string applied to the page body.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Theme {
    /// No class.
    #[default]
    Light,
    /// `dark` class.
    Dark,
    /// Any other named theme class.
    Named(String),
}

impl Theme {
    /// Theme from a stored class string.
    #[must_use]
    pub fn from_class(class: &str) -> Self {
        match class.trim() {
            "" => Self::Light,
            DARK => Self::Dark,
            other => Self::Named(other.to_string()),
        }
    }

    /// Theme from a user choice, where `light` means no class.
    #[must_use]
    pub fn from_choice(choice: &str) -> Self {
        if choice.trim().eq_ignore_ascii_case("light") {
            Self::Light
        } else {
            Self::from_class(&choice.trim().to_ascii_lowercase())
        }
    }

    /// Class string to persist.
    #[must_use]
    pub fn class(&self) -> &str {
        match self {
            Self::Light => "",
            Self::Dark => DARK,
            Self::Named(name) => name,
        }
    }

    /// Flip between dark and light; named themes switch to dark.
    #[must_use]
    pub fn toggled_dark(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            _ => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            other => f.write_str(other.class()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_strings() {
        assert_eq!(Theme::from_class(""), Theme::Light);
        assert_eq!(Theme::from_class("dark"), Theme::Dark);
        assert_eq!(Theme::from_class("ocean").class(), "ocean");
        assert_eq!(Theme::from_choice("Light").class(), "");
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled_dark(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled_dark(), Theme::Light);
    }
}
