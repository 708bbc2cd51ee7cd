//! Host platform detection.

use crate::dispatch::HostOs;

/// Identifier of the OS this binary was built for, e.g. `linux` or `macos`.
///
/// Passed to the dispatcher verbatim; unsupported systems are reported when
/// a command is run, not at startup.
#[must_use]
pub fn current_os_identifier() -> &'static str {
    std::env::consts::OS
}

/// Supported host OS, if this is one
#[must_use]
pub fn detect() -> Option<HostOs> {
    HostOs::from_identifier(current_os_identifier()).ok()
}
