use super::RegistrySource;
use crate::Result;
use quicklaunch_types::Candidate;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Commands file on disk.
///
/// Accepts either a bare JSON array of entries or an object with an `apps`
/// array, so both hand-written lists and exported configs load.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CommandsFile {
    List(Vec<Candidate>),
    Document { apps: Vec<Candidate> },
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse commands file content, dropping unusable entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid JSON in either layout.
    pub fn parse(content: &str) -> Result<Vec<Candidate>> {
        let file: CommandsFile = serde_json::from_str(content)?;
        let entries = match file {
            CommandsFile::List(entries) | CommandsFile::Document { apps: entries } => entries,
        };

        Ok(entries
            .into_iter()
            .filter(|entry| {
                let usable = !entry.title.trim().is_empty() && !entry.command.trim().is_empty();
                if !usable {
                    warn!(
                        "Skipping commands file entry with empty title or command: {:?}",
                        entry.title
                    );
                }
                usable
            })
            .collect())
    }
}

impl RegistrySource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn load(&self) -> Result<Vec<Candidate>> {
        let content = std::fs::read_to_string(&self.path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_bare_array() {
        let candidates = FileSource::parse(
            r#"[
                {"title": "Firefox", "description": "Browser", "command": "firefox"},
                {"title": "Terminal", "command": "alacritty"}
            ]"#,
        )
        .unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].description, "Browser");
        assert_eq!(candidates[1].command, "alacritty");
    }

    #[test]
    fn test_parse_apps_document() {
        let candidates =
            FileSource::parse(r#"{"apps": [{"title": "Files", "command": "nautilus"}]}"#).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Files");
    }

    #[test]
    fn test_parse_skips_empty_entries() {
        let candidates = FileSource::parse(
            r#"[
                {"title": "", "command": "x"},
                {"title": "Blank", "command": "   "},
                {"title": "Ok", "command": "ok"}
            ]"#,
        )
        .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Ok");
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(FileSource::parse("{not json").is_err());
        assert!(FileSource::parse(r#"{"other": []}"#).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"title": "Htop", "command": "htop"}}]"#).unwrap();

        let source = FileSource::new(file.path());
        let candidates = source.load().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(source.name(), "file");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let source = FileSource::new("/nonexistent/quicklaunch/commands.json");
        assert!(matches!(source.load(), Err(crate::Error::Io(_))));
    }
}
