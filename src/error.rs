use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PassfitError {
    #[error("Invalid target file '{0}': file must have a valid extension such as .c or .cpp")]
    InvalidTargetFile(String),

    #[error("Invalid individual: {0}")]
    InvalidIndividual(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' exited with status {status}")]
    CommandFailed { command: String, status: i32 },

    #[error("Failed to write report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl PassfitError {
    /// Errors that mean the run itself is misconfigured. These terminate the process.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PassfitError::InvalidTargetFile(_) | PassfitError::Configuration(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PassfitError>;
