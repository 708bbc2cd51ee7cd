//! Shared types for quicklaunch components.
//!
//! This crate provides the candidate model and the event vocabulary exchanged
//! between the interaction engine in quicklaunch-core and a view layer such as
//! quicklaunch-tui. All types are serializable so a view can live out of process.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable opaque identifier of a candidate within a registry.
///
/// Assigned by the registry in load order; never derived from display text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CandidateId(pub usize);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A nameable, executable command entry shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Assigned by the registry; absent from command files
    #[serde(skip)]
    pub id: CandidateId,

    /// Display name, matched against the query
    pub title: String,

    /// Secondary display text
    #[serde(default)]
    pub description: String,

    /// Literal text handed to the runner
    pub command: String,
}

impl Candidate {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: CandidateId::default(),
            title: title.into(),
            description: description.into(),
            command: command.into(),
        }
    }
}

/// Cursor movement requested by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Signed index offset for this direction.
    #[must_use]
    pub fn delta(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// What caused a selection change.
///
/// Only `User` selections may trigger execution in a view; `Programmatic`
/// changes come from list refreshes and keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrigin {
    Programmatic,
    User,
}

/// Events sent from the view to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    /// Query text changed (every keystroke)
    QueryChanged { query: String },

    /// Move the selection cursor one step
    MoveSelection { direction: Direction },

    /// Explicit confirm (enter pressed)
    Confirm,

    /// Direct user selection of a row in the filtered list (pointer click)
    Pick { index: usize },

    /// Close the session without running anything
    Cancel,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The selected command was launched
    Launched,
    /// A candidate was confirmed but the launch could not be started
    LaunchFailed,
    /// The user closed the session
    Cancelled,
}

/// Updates sent from the engine to the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionUpdate {
    /// The filtered list was recomputed (full replacement)
    ListChanged { items: Vec<CandidateId> },

    /// The selection cursor moved; `None` means nothing is selected
    SelectionChanged {
        index: Option<usize>,
        origin: SelectionOrigin,
    },

    /// The session is over; the view should close
    SessionEnded { reason: EndReason },
}

impl SessionUpdate {
    #[must_use]
    pub fn is_session_end(&self) -> bool {
        matches!(self, SessionUpdate::SessionEnded { .. })
    }
}
