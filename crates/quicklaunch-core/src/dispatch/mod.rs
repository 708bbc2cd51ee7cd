//! Command dispatch: from an OS identifier to something that can run a command.
//!
//! Resolution is a pure lookup over a closed set of supported systems. Running
//! is fire-and-forget: a runner reports whether the launch started, never how
//! the launched program ends.

mod shell;

pub use shell::ShellRunner;

use crate::{Error, Result};

/// Operating systems a runner exists for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Linux,
}

impl HostOs {
    /// Parse an OS identifier such as `std::env::consts::OS`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOs` carrying the identifier if it is not a
    /// supported system.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        match identifier.to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(HostOs::MacOs),
            "linux" => Ok(HostOs::Linux),
            _ => Err(Error::UnsupportedOs(identifier.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HostOs::MacOs => "macos",
            HostOs::Linux => "linux",
        }
    }
}

/// Executes a command string
pub trait Runner {
    /// Start `command` and return once the launch has succeeded or failed.
    ///
    /// # Errors
    ///
    /// Returns `Error::LaunchFailed` if the command could not be started.
    fn execute(&self, command: &str) -> Result<()>;
}

/// Resolves a runner for an OS identifier
pub trait Dispatch {
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOs` for identifiers outside the supported set.
    fn resolve(&self, os: &str) -> Result<Box<dyn Runner>>;
}

/// Production dispatch: a shell runner per supported OS
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellDispatch;

impl Dispatch for ShellDispatch {
    fn resolve(&self, os: &str) -> Result<Box<dyn Runner>> {
        let host = HostOs::from_identifier(os)?;
        Ok(Box::new(ShellRunner::new(host)))
    }
}

/// Resolve the production runner for `os`.
///
/// # Errors
///
/// Returns `Error::UnsupportedOs` for identifiers outside the supported set.
pub fn resolve_runner(os: &str) -> Result<Box<dyn Runner>> {
    ShellDispatch.resolve(os)
}
