//! Test module for quicklaunch-core
//!
//! Cross-module tests for:
//! - Filtering and selection properties over arbitrary registries
//! - End-to-end sessions from registry loading to command dispatch
//! - Configuration loading
