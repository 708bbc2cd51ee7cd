//! The launcher interaction engine.
//!
//! A `Session` owns the query, the filtered list and the selection cursor for
//! one launcher invocation. Every operation runs synchronously on the caller's
//! thread and returns the updates the view should apply, in order.
//!
//! Selection changes carry their origin. Refreshes and keyboard navigation
//! produce `SelectionOrigin::Programmatic`; only `pick` produces
//! `SelectionOrigin::User`. Execution happens exclusively through `confirm`
//! and `pick`, never as a reaction to a selection update.

use crate::dispatch::{Dispatch, ShellDispatch};
use crate::matcher::matches;
use crate::registry::Registry;
use crate::{Error, Result};
use quicklaunch_types::{
    Candidate, CandidateId, Direction, EndReason, SelectionOrigin, SessionUpdate, ViewEvent,
};
use tracing::{debug, error, info, warn};

/// State of one launcher session
pub struct Session<D: Dispatch = ShellDispatch> {
    registry: Registry,
    query: String,
    filtered: Vec<CandidateId>,
    selected: Option<usize>,
    os: String,
    dispatch: D,
    ended: bool,
}

impl Session<ShellDispatch> {
    /// Session launching through the platform shell
    #[must_use]
    pub fn with_shell(registry: Registry, os: impl Into<String>) -> Self {
        Self::new(registry, os, ShellDispatch)
    }
}

impl<D: Dispatch> Session<D> {
    /// Start a session with an empty query over the whole registry.
    #[must_use]
    pub fn new(registry: Registry, os: impl Into<String>, dispatch: D) -> Self {
        let filtered: Vec<CandidateId> = registry.iter().map(|c| c.id).collect();
        let selected = if filtered.is_empty() { None } else { Some(0) };
        Self {
            registry,
            query: String::new(),
            filtered,
            selected,
            os: os.into(),
            dispatch,
            ended: false,
        }
    }

    /// Updates describing the initial list and selection.
    #[must_use]
    pub fn open(&self) -> Vec<SessionUpdate> {
        if self.ended {
            return Vec::new();
        }
        self.list_updates()
    }

    /// Route a view event to the matching operation.
    pub fn handle(&mut self, event: ViewEvent) -> Vec<SessionUpdate> {
        match event {
            ViewEvent::QueryChanged { query } => self.query_changed(query),
            ViewEvent::MoveSelection { direction } => self.move_selection(direction),
            ViewEvent::Confirm => self.confirm(),
            ViewEvent::Pick { index } => self.pick(index),
            ViewEvent::Cancel => self.cancel(),
        }
    }

    /// Replace the query and recompute the filtered list from scratch.
    ///
    /// The selection resets to the first row, or to nothing if no candidate
    /// matches.
    pub fn query_changed(&mut self, query: impl Into<String>) -> Vec<SessionUpdate> {
        if self.ended {
            return Vec::new();
        }

        self.query = query.into();
        self.filtered = self
            .registry
            .iter()
            .filter(|c| matches(&c.title, &self.query))
            .map(|c| c.id)
            .collect();
        self.selected = if self.filtered.is_empty() {
            None
        } else {
            Some(0)
        };

        debug!(
            "Query {:?} matched {}/{} candidates",
            self.query,
            self.filtered.len(),
            self.registry.len()
        );

        self.list_updates()
    }

    /// Move the cursor one row, clamped to the list bounds.
    ///
    /// Does nothing on an empty list.
    pub fn move_selection(&mut self, direction: Direction) -> Vec<SessionUpdate> {
        if self.ended || self.filtered.is_empty() {
            return Vec::new();
        }

        let last = self.filtered.len() - 1;
        let current = self.selected.unwrap_or(0);
        let index = current.saturating_add_signed(direction.delta()).min(last);
        self.selected = Some(index);

        vec![SessionUpdate::SelectionChanged {
            index: Some(index),
            origin: SelectionOrigin::Programmatic,
        }]
    }

    /// Direct user selection of a row, followed by a confirm.
    ///
    /// An index outside the filtered list is ignored.
    pub fn pick(&mut self, index: usize) -> Vec<SessionUpdate> {
        if self.ended || index >= self.filtered.len() {
            return Vec::new();
        }

        self.selected = Some(index);
        let mut updates = vec![SessionUpdate::SelectionChanged {
            index: Some(index),
            origin: SelectionOrigin::User,
        }];
        updates.extend(self.confirm());
        updates
    }

    /// Run the selected candidate's command and end the session.
    ///
    /// Nothing happens when nothing is selected. Once a candidate is found
    /// the session ends whether or not the launch succeeds; launch problems
    /// are logged, not surfaced.
    pub fn confirm(&mut self) -> Vec<SessionUpdate> {
        if self.ended {
            return Vec::new();
        }
        let Some(id) = self.selected.and_then(|i| self.filtered.get(i).copied()) else {
            return Vec::new();
        };
        let Some(candidate) = self.registry.get(id) else {
            warn!("{}", Error::SelectionLookupMiss(id));
            return Vec::new();
        };

        let reason = match self.launch(candidate) {
            Ok(()) => EndReason::Launched,
            Err(e) => {
                error!("Failed to run {:?}: {}", candidate.title, e);
                EndReason::LaunchFailed
            }
        };

        self.end(reason)
    }

    /// Close the session without running anything.
    pub fn cancel(&mut self) -> Vec<SessionUpdate> {
        if self.ended {
            return Vec::new();
        }
        self.end(EndReason::Cancelled)
    }

    fn launch(&self, candidate: &Candidate) -> Result<()> {
        info!("Running {:?}: {}", candidate.title, candidate.command);
        let runner = self.dispatch.resolve(&self.os)?;
        runner.execute(&candidate.command)
    }

    fn end(&mut self, reason: EndReason) -> Vec<SessionUpdate> {
        self.ended = true;
        vec![SessionUpdate::SessionEnded { reason }]
    }

    fn list_updates(&self) -> Vec<SessionUpdate> {
        vec![
            SessionUpdate::ListChanged {
                items: self.filtered.clone(),
            },
            SessionUpdate::SelectionChanged {
                index: self.selected,
                origin: SelectionOrigin::Programmatic,
            },
        ]
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Filtered candidates in registry order
    pub fn filtered(&self) -> impl Iterator<Item = &Candidate> {
        self.filtered.iter().filter_map(|id| self.registry.get(*id))
    }

    #[must_use]
    pub fn filtered_ids(&self) -> &[CandidateId] {
        &self.filtered
    }

    /// Cursor into the filtered list; `None` when the list is empty
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Candidate> {
        let id = self.filtered.get(self.selected?)?;
        self.registry.get(*id)
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

/// Titles of every candidate in `registry` matching `query`, in order.
#[must_use]
pub fn filter_titles<'a>(registry: &'a Registry, query: &str) -> Vec<&'a str> {
    registry
        .iter()
        .filter(|c| matches(&c.title, query))
        .map(|c| c.title.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::{RecordingDispatch, make_registry};

    fn session(titles: &[&str]) -> Session<RecordingDispatch> {
        Session::new(make_registry(titles), "linux", RecordingDispatch::default())
    }

    #[test]
    fn test_new_selects_first_row() {
        let s = session(&["Alpha", "Beta"]);
        assert_eq!(s.selected_index(), Some(0));
        assert_eq!(s.filtered_ids().len(), 2);
        assert_eq!(s.query(), "");
    }

    #[test]
    fn test_new_empty_registry_has_no_selection() {
        let s = session(&[]);
        assert_eq!(s.selected_index(), None);
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_open_emits_list_then_programmatic_selection() {
        let s = session(&["Alpha"]);
        assert_eq!(
            s.open(),
            vec![
                SessionUpdate::ListChanged {
                    items: vec![CandidateId(0)]
                },
                SessionUpdate::SelectionChanged {
                    index: Some(0),
                    origin: SelectionOrigin::Programmatic
                },
            ]
        );
    }

    #[test]
    fn test_move_clamps_at_both_ends() {
        let mut s = session(&["A", "B", "C"]);
        s.move_selection(Direction::Up);
        assert_eq!(s.selected_index(), Some(0));

        s.move_selection(Direction::Down);
        s.move_selection(Direction::Down);
        s.move_selection(Direction::Down);
        assert_eq!(s.selected_index(), Some(2));
    }

    #[test]
    fn test_move_on_empty_list_is_silent() {
        let mut s = session(&["Alpha"]);
        s.query_changed("zzz");
        assert!(s.move_selection(Direction::Down).is_empty());
        assert_eq!(s.selected_index(), None);
    }

    #[test]
    fn test_move_is_programmatic() {
        let mut s = session(&["A", "B"]);
        let updates = s.move_selection(Direction::Down);
        assert_eq!(
            updates,
            vec![SessionUpdate::SelectionChanged {
                index: Some(1),
                origin: SelectionOrigin::Programmatic
            }]
        );
    }

    #[test]
    fn test_query_change_resets_selection() {
        let mut s = session(&["Alpha", "Beta", "Gamma"]);
        s.move_selection(Direction::Down);
        s.query_changed("a");
        assert_eq!(s.selected_index(), Some(0));

        let updates = s.query_changed("xyz");
        assert_eq!(s.selected_index(), None);
        assert_eq!(
            updates[1],
            SessionUpdate::SelectionChanged {
                index: None,
                origin: SelectionOrigin::Programmatic
            }
        );
    }

    #[test]
    fn test_confirm_without_selection_is_noop() {
        let mut s = session(&["Alpha"]);
        s.query_changed("q");
        assert!(s.confirm().is_empty());
        assert!(!s.is_ended());
        assert!(s.dispatch.executed().is_empty());
    }

    #[test]
    fn test_confirm_runs_selected_command_once() {
        let mut s = session(&["Alpha", "Beta"]);
        s.move_selection(Direction::Down);
        let updates = s.confirm();

        assert_eq!(
            updates,
            vec![SessionUpdate::SessionEnded {
                reason: EndReason::Launched
            }]
        );
        assert_eq!(s.dispatch.executed(), vec!["cmd-beta".to_string()]);
        assert!(s.is_ended());
    }

    #[test]
    fn test_unsupported_os_still_ends_session() {
        let mut s = Session::new(
            make_registry(&["Alpha"]),
            "unknown-os",
            RecordingDispatch::default(),
        );
        let updates = s.confirm();
        assert_eq!(
            updates,
            vec![SessionUpdate::SessionEnded {
                reason: EndReason::LaunchFailed
            }]
        );
        assert!(s.dispatch.executed().is_empty());
    }

    #[test]
    fn test_launch_failure_still_ends_session() {
        let mut s = Session::new(
            make_registry(&["Alpha"]),
            "linux",
            RecordingDispatch::failing(),
        );
        let updates = s.confirm();
        assert_eq!(
            updates,
            vec![SessionUpdate::SessionEnded {
                reason: EndReason::LaunchFailed
            }]
        );
        assert_eq!(s.dispatch.executed().len(), 1);
    }

    #[test]
    fn test_pick_is_user_selection_then_confirm() {
        let mut s = session(&["Alpha", "Beta", "Gamma"]);
        let updates = s.pick(2);
        assert_eq!(
            updates,
            vec![
                SessionUpdate::SelectionChanged {
                    index: Some(2),
                    origin: SelectionOrigin::User
                },
                SessionUpdate::SessionEnded {
                    reason: EndReason::Launched
                },
            ]
        );
        assert_eq!(s.dispatch.executed(), vec!["cmd-gamma".to_string()]);
    }

    #[test]
    fn test_pick_out_of_range_is_ignored() {
        let mut s = session(&["Alpha"]);
        assert!(s.pick(5).is_empty());
        assert!(!s.is_ended());
    }

    #[test]
    fn test_cancel_ends_without_running() {
        let mut s = session(&["Alpha"]);
        assert_eq!(
            s.cancel(),
            vec![SessionUpdate::SessionEnded {
                reason: EndReason::Cancelled
            }]
        );
        assert!(s.dispatch.executed().is_empty());
    }

    #[test]
    fn test_ended_session_ignores_events() {
        let mut s = session(&["Alpha", "Beta"]);
        s.confirm();
        assert!(s.query_changed("b").is_empty());
        assert!(s.move_selection(Direction::Down).is_empty());
        assert!(s.confirm().is_empty());
        assert!(s.cancel().is_empty());
        assert!(s.open().is_empty());
        assert_eq!(s.dispatch.executed().len(), 1);
    }

    #[test]
    fn test_duplicate_titles_run_the_selected_one() {
        let registry = Registry::new(vec![
            Candidate::new("Editor", "stable", "edit-stable"),
            Candidate::new("Editor", "nightly", "edit-nightly"),
        ]);
        let mut s = Session::new(registry, "linux", RecordingDispatch::default());
        s.move_selection(Direction::Down);
        s.confirm();
        assert_eq!(s.dispatch.executed(), vec!["edit-nightly".to_string()]);
    }

    #[test]
    fn test_filter_titles() {
        let registry = make_registry(&["Alpha", "Beta", "Gamma"]);
        assert_eq!(filter_titles(&registry, "al"), vec!["Alpha"]);
        assert_eq!(filter_titles(&registry, "A"), vec!["Alpha", "Beta", "Gamma"]);
    }
}
