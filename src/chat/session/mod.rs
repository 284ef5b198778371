//! Session controller and its collaborators' seams.

pub mod context;
pub mod controller;
pub mod sink;

#[cfg(test)]
#[allow(dead_code)]
pub(crate) mod testing;

pub use context::{ChatState, RenderTarget, SessionContext};
pub use controller::SessionController;
pub use sink::FrameSink;
