use crate::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following the XDG base directory layout
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/quicklaunch)
    pub config: PathBuf,

    /// Cache directory (~/.cache/quicklaunch)
    pub cache: PathBuf,

    /// Log files written by the view (~/.cache/quicklaunch/logs)
    pub logs: PathBuf,

    /// Settings file path
    pub config_file: PathBuf,
}

impl Directories {
    /// Create a new `Directories` instance with standard XDG paths.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self> {
        let project = ProjectDirs::from("", "", "quicklaunch")
            .ok_or_else(|| Error::Config("cannot determine home directory".to_string()))?;

        let config = project.config_dir().to_path_buf();
        let cache = project.cache_dir().to_path_buf();

        Ok(Self {
            config_file: config.join("config.json"),
            logs: cache.join("logs"),
            config,
            cache,
        })
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.json"),
            logs: base.join("logs"),
            config: base.clone(),
            cache: base,
        }
    }

    /// Ensure all directories exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)?;
        std::fs::create_dir_all(&self.cache)?;
        std::fs::create_dir_all(&self.logs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_sets_all_paths() {
        let base = PathBuf::from("/tmp/test-quicklaunch");
        let dirs = Directories::with_base(base.clone());

        assert_eq!(dirs.config, base);
        assert_eq!(dirs.cache, base);
        assert_eq!(dirs.logs, base.join("logs"));
        assert_eq!(dirs.config_file, base.join("config.json"));
    }

    #[test]
    fn test_ensure_exists_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let base = temp_dir.path().join("quicklaunch-test-subdir");
        let dirs = Directories::with_base(base);

        assert!(!dirs.logs.exists());

        dirs.ensure_exists().unwrap();

        assert!(dirs.config.exists());
        assert!(dirs.cache.exists());
        assert!(dirs.logs.exists());
    }

    #[test]
    fn test_ensure_exists_idempotent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dirs = Directories::with_base(temp_dir.path().to_path_buf());

        dirs.ensure_exists().unwrap();
        dirs.ensure_exists().unwrap();

        assert!(dirs.config.exists());
    }

    #[test]
    fn test_new_returns_named_paths() {
        let Ok(dirs) = Directories::new() else {
            // No home directory in this environment
            return;
        };

        assert!(dirs.config.to_string_lossy().contains("quicklaunch"));
        assert!(dirs.cache.to_string_lossy().contains("quicklaunch"));
        assert!(dirs.config_file.to_string_lossy().ends_with("config.json"));
        assert!(dirs.logs.ends_with("logs"));
    }
}
