use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure kinds surfaced by scanning, watching and emitting.
///
/// Everything except [`Error::WatchDelivery`] is fatal to the run that
/// produced it. Delivery faults are only logged by the watch loop.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed package record{}: {reason}", display_path(.path))]
    MalformedRecord {
        path: Option<PathBuf>,
        reason: String,
    },

    #[error("Failed to watch metadata directory: {0}")]
    WatchSetup(#[source] notify::Error),

    #[error("Filesystem event delivery failed: {0}")]
    WatchDelivery(#[source] notify::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            path: None,
            reason: reason.into(),
        }
    }

    /// Attach the metadata file path to a parse failure.
    pub(crate) fn at_path(self, file: PathBuf) -> Self {
        match self {
            Error::MalformedRecord { path: None, reason } => Error::MalformedRecord {
                path: Some(file),
                reason,
            },
            other => other,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}
