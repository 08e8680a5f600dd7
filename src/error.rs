//! Errors for recordings and configuration files.

use orrery_input::InputError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: invalid frame: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}:{line}: timestamp {at_ms} is earlier than previous frame ({previous_ms})", path.display())]
    OutOfOrder {
        path: PathBuf,
        line: usize,
        at_ms: u64,
        previous_ms: u64,
    },

    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid config file {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error(transparent)]
    Input(#[from] InputError),
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }

    /// Line number for errors tied to a position in a recording.
    pub fn line(&self) -> Option<usize> {
        match self {
            SessionError::Parse { line, .. } | SessionError::OutOfOrder { line, .. } => Some(*line),
            _ => None,
        }
    }
}
