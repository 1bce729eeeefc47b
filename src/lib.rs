pub mod commands;
pub mod error;
pub mod manifest;
pub mod package;
pub mod runtime;
pub mod watcher;

pub use error::{Error, Result};
