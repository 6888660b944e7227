//! Error types for the command-line framework.

use std::path::PathBuf;
use thiserror::Error;

/// Framework errors, partitioned by where they surface: declaration time
/// (`DuplicateOption`), bootstrap (`ConfigFile`), full parse (`Usage`,
/// `MissingCommand`), or command execution (`Command`).
#[derive(Debug, Error)]
pub enum Error {
    #[error("config file {}: {reason}", .path.display())]
    ConfigFile { path: PathBuf, reason: String },

    #[error("duplicate option `{name}` on command `{command}`")]
    DuplicateOption { command: String, name: String },

    #[error("{0}")]
    Usage(String),

    #[error("missing COMMAND")]
    MissingCommand { usage: String },

    #[error(transparent)]
    Command(#[from] anyhow::Error),
}

impl Error {
    /// Process exit code for this error: 2 for usage-class failures,
    /// 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) | Error::MissingCommand { .. } => 2,
            Error::ConfigFile { .. } | Error::DuplicateOption { .. } | Error::Command(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
