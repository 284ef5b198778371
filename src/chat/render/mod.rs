//! Render surface: projections from registry and session state to display models.

pub mod roster;
pub mod surface;
pub mod theme;
pub mod transcript;

pub use roster::{Roster, RosterEntry};
pub use surface::{Notice, RenderSurface};
pub use theme::Theme;
pub use transcript::{DateGroup, Transcript, day_label};
