//! Terminal view layer for the quicklaunch launcher.
//!
//! Translates terminal input into engine events and draws the engine's
//! filtered list. Runs alongside a `quicklaunch_core::Session` on one thread.

pub mod app;
pub mod colors;
pub mod render;
