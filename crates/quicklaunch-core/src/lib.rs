pub mod config;
pub mod dispatch;
pub mod matcher;
pub mod platform;
pub mod registry;
pub mod session;

mod error;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use session::Session;

pub use quicklaunch_types::*;
