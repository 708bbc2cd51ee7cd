//! Installed application discovery.
//!
//! Linux desktops describe applications with XDG `.desktop` files; macOS
//! ships them as `.app` bundles. Both are turned into candidates whose command
//! is a shell line that starts the application.

use super::RegistrySource;
use crate::Result;
use crate::config::Config;
use quicklaunch_types::Candidate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How applications are laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `*.desktop` files in XDG application directories
    Xdg,
    /// `*.app` bundles
    AppBundles,
}

impl Layout {
    /// Layout used by the platform this binary was built for
    #[must_use]
    pub fn native() -> Self {
        if cfg!(target_os = "macos") {
            Layout::AppBundles
        } else {
            Layout::Xdg
        }
    }
}

/// Discovers installed applications
#[derive(Debug, Clone)]
pub struct DesktopSource {
    layout: Layout,
    dirs: Vec<PathBuf>,
    include_hidden: bool,
}

impl DesktopSource {
    #[must_use]
    pub fn new(layout: Layout, dirs: Vec<PathBuf>) -> Self {
        Self {
            layout,
            dirs,
            include_hidden: false,
        }
    }

    /// Native layout and directories plus any configured extra directories.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let layout = Layout::native();
        let mut dirs = match layout {
            Layout::Xdg => xdg_application_dirs(),
            Layout::AppBundles => bundle_dirs(),
        };
        dirs.extend(config.application_dirs.iter().cloned());

        Self {
            layout,
            dirs,
            include_hidden: config.include_hidden,
        }
    }

    #[must_use]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    fn scan_dir(&self, dir: &Path) -> Vec<Candidate> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            debug!("Skipping unreadable application dir {}", dir.display());
            return Vec::new();
        };

        let mut found = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let candidate = match self.layout {
                Layout::Xdg => {
                    if path.extension().and_then(|e| e.to_str()) != Some("desktop") {
                        continue;
                    }
                    match std::fs::read_to_string(&path) {
                        Ok(content) => parse_desktop_entry(&content, self.include_hidden),
                        Err(e) => {
                            warn!("Failed to read {}: {}", path.display(), e);
                            None
                        }
                    }
                }
                Layout::AppBundles => app_bundle_candidate(&path),
            };
            found.extend(candidate);
        }
        found
    }
}

impl RegistrySource for DesktopSource {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn load(&self) -> Result<Vec<Candidate>> {
        let mut candidates: Vec<Candidate> =
            self.dirs.iter().flat_map(|dir| self.scan_dir(dir)).collect();

        // Stable sort keeps earlier directories first among equal titles, so
        // user entries shadow system ones.
        candidates.sort_by_key(|c| c.title.to_lowercase());

        let mut seen = HashSet::new();
        candidates.retain(|c| seen.insert(c.title.clone()));

        debug!(
            "Discovered {} applications in {} dirs",
            candidates.len(),
            self.dirs.len()
        );
        Ok(candidates)
    }
}

/// XDG data dirs with `applications` appended, user dir first
fn xdg_application_dirs() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    match std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        Some(data_home) => roots.push(PathBuf::from(data_home)),
        None => {
            if let Some(home) = std::env::var_os("HOME") {
                roots.push(PathBuf::from(home).join(".local/share"));
            }
        }
    }

    let data_dirs = std::env::var("XDG_DATA_DIRS")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
    roots.extend(
        data_dirs
            .split(':')
            .filter(|s| !s.is_empty())
            .map(PathBuf::from),
    );

    roots.into_iter().map(|root| root.join("applications")).collect()
}

fn bundle_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/Applications"),
        PathBuf::from("/System/Applications"),
        PathBuf::from("/System/Applications/Utilities"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join("Applications"));
    }
    dirs
}

/// Parse the `[Desktop Entry]` group of a desktop file.
///
/// Returns `None` for non-application entries, entries without `Name` or
/// `Exec`, and hidden entries unless `include_hidden` is set.
#[must_use]
pub fn parse_desktop_entry(content: &str, include_hidden: bool) -> Option<Candidate> {
    let mut in_entry = false;
    let mut name = None;
    let mut comment = None;
    let mut exec = None;
    let mut kind = None;
    let mut hidden = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            in_entry = line == "[Desktop Entry]";
            continue;
        }
        if !in_entry {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Name" => name = Some(value.to_string()),
            "Comment" => comment = Some(value.to_string()),
            "Exec" => exec = Some(value.to_string()),
            "Type" => kind = Some(value.to_string()),
            "NoDisplay" | "Hidden" if value == "true" => hidden = true,
            _ => {}
        }
    }

    if kind.as_deref() != Some("Application") || (hidden && !include_hidden) {
        return None;
    }

    let command = strip_field_codes(&exec?);
    let name = name?;
    if command.is_empty() || name.is_empty() {
        return None;
    }

    Some(Candidate::new(name, comment.unwrap_or_default(), command))
}

/// Remove `%f`-style field codes from an `Exec` value.
///
/// A token that consists only of field codes is dropped together with the
/// whitespace after it; all other whitespace is kept as written.
#[must_use]
pub fn strip_field_codes(exec: &str) -> String {
    let mut out = String::with_capacity(exec.len());
    let mut rest = exec;

    while !rest.is_empty() {
        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (token, tail) = rest.split_at(token_end);
        let space_end = tail
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(tail.len());
        let (space, next) = tail.split_at(space_end);

        let expanded = expand_field_codes(token);
        if token.is_empty() || !expanded.is_empty() {
            out.push_str(&expanded);
            out.push_str(space);
        }
        rest = next;
    }

    out.trim_end().to_string()
}

fn expand_field_codes(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            // Known and deprecated codes alike expand to nothing
            Some(_) | None => {}
        }
    }
    out
}

/// Quote `arg` as a single POSIX shell word.
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

fn app_bundle_candidate(path: &Path) -> Option<Candidate> {
    if path.extension().and_then(|e| e.to_str()) != Some("app") {
        return None;
    }
    let title = path.file_stem()?.to_str()?.to_string();
    let location = path.to_str()?;
    let command = format!("open -a {}", shell_quote(location));
    Some(Candidate::new(title, location.to_string(), command))
}
