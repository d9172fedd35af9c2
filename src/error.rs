//! Error types for apt-venv

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AptVenvError {
    #[error("Invalid configuration file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot read configuration file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Carries the full, user-facing list of valid releases.
    #[error("{message}")]
    ReleaseNotFound { message: String },

    #[error("Release \"{0}\" is not a valid directory name")]
    InvalidRelease(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error(
        "Cannot create link {}: path is taken (expected a link to {})",
        link.display(),
        expected.display()
    )]
    SymlinkConflict { link: PathBuf, expected: PathBuf },

    #[error("Failed to determine the user {0} directory")]
    NoBaseDirectory(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AptVenvError>;
