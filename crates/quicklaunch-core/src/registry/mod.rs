//! Candidate registry and the sources that populate it.
//!
//! A registry is loaded once before a session starts and never mutated
//! afterwards. Sources may fail; a failed load yields an empty registry and
//! an error log entry, never a fatal error.

mod desktop;
mod file;

pub use desktop::{DesktopSource, Layout, parse_desktop_entry, strip_field_codes};
pub use file::FileSource;

use crate::Result;
use quicklaunch_types::{Candidate, CandidateId};
use tracing::{error, info};

/// Something that can produce an ordered list of candidates
pub trait RegistrySource {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Produce candidates in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying file or directories cannot be read.
    fn load(&self) -> Result<Vec<Candidate>>;
}

/// Ordered, immutable collection of candidates
#[derive(Debug, Clone, Default)]
pub struct Registry {
    candidates: Vec<Candidate>,
}

impl Registry {
    /// Build a registry, assigning each candidate its position as id.
    #[must_use]
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let candidates = candidates
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| Candidate {
                id: CandidateId(index),
                ..candidate
            })
            .collect();
        Self { candidates }
    }

    #[must_use]
    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.get(id.0)
    }

    /// Linear scan by display title; the first match wins.
    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.title == title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Load a registry from `source`, falling back to an empty one on failure.
pub fn load_registry(source: &dyn RegistrySource) -> Registry {
    match source.load() {
        Ok(candidates) => {
            info!(
                "Loaded {} candidates from {} source",
                candidates.len(),
                source.name()
            );
            Registry::new(candidates)
        }
        Err(e) => {
            let err = crate::Error::RegistryLoadFailed {
                source_name: source.name().to_string(),
                reason: e.to_string(),
            };
            error!("{err}");
            Registry::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct FailingSource;

    impl RegistrySource for FailingSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn load(&self) -> Result<Vec<Candidate>> {
            Err(Error::Config("boom".to_string()))
        }
    }

    struct FixedSource(Vec<Candidate>);

    impl RegistrySource for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn load(&self) -> Result<Vec<Candidate>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_ids_follow_load_order() {
        let registry = Registry::new(vec![
            Candidate::new("Alpha", "", "a"),
            Candidate::new("Beta", "", "b"),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(CandidateId(0)).unwrap().title, "Alpha");
        assert_eq!(registry.get(CandidateId(1)).unwrap().id, CandidateId(1));
        assert!(registry.get(CandidateId(2)).is_none());
    }

    #[test]
    fn test_find_by_title_first_match_wins() {
        let registry = Registry::new(vec![
            Candidate::new("Dup", "", "first"),
            Candidate::new("Dup", "", "second"),
        ]);
        assert_eq!(registry.find_by_title("Dup").unwrap().command, "first");
        assert!(registry.find_by_title("dup").is_none());
    }

    #[test]
    fn test_failed_load_yields_empty_registry() {
        let registry = load_registry(&FailingSource);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_successful_load() {
        let registry = load_registry(&FixedSource(vec![Candidate::new("X", "", "x")]));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().unwrap().title, "X");
    }
}
