use quicklaunch_types::CandidateId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Registry load failed ({source_name}): {reason}")]
    RegistryLoadFailed { source_name: String, reason: String },

    #[error("Unsupported OS: {0}")]
    UnsupportedOs(String),

    #[error("Launch failed: {0}")]
    LaunchFailed(String),

    #[error("No candidate for selection {0}")]
    SelectionLookupMiss(CandidateId),
}

pub type Result<T> = std::result::Result<T, Error>;
