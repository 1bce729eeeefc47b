//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over the filesystem,
//! so the scanner and the manifest writers can be driven by a mock in tests.
//!
//! # Structure
//!
//! - `fs` - File system operations (read, write, directory listing)

mod fs;

use std::io;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    /// List the entries of a directory, in the order the OS returns them.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Whether the path is a directory. Symlinks are not followed.
    fn is_dir(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.read_impl(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.write_impl(path, contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.rename_impl(from, to)
    }
}
