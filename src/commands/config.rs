use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment fallback for the metadata root.
pub const DB_ENV: &str = "PACROOTS_DB";

/// Environment fallback for the manifest output file.
pub const OUTPUT_ENV: &str = "PACROOTS_OUTPUT";

/// Settings resolved once at startup and handed to the commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_root: PathBuf,
    pub output: Option<PathBuf>,
}

impl Config {
    /// The metadata root is required for every command.
    pub fn new(db_root: Option<PathBuf>, output: Option<PathBuf>) -> Result<Self> {
        let db_root = db_root.ok_or_else(|| {
            Error::Configuration(format!("metadata root not set (use --db or {DB_ENV})"))
        })?;
        Ok(Self { db_root, output })
    }

    /// The output file, for commands that write a manifest.
    pub fn output(&self) -> Result<&Path> {
        self.output.as_deref().ok_or_else(|| {
            Error::Configuration(format!("output file not set (use --output or {OUTPUT_ENV})"))
        })
    }
}
