use log::debug;
use std::path::Path;

use crate::error::{Error, Result};
use crate::runtime::Runtime;

use super::{PackageRecord, RecordSet};

/// File name of a package's metadata record inside the database.
pub const METADATA_FILE: &str = "desc";

/// Scan a metadata tree for every `desc` file and parse it.
///
/// Directory structure: `<root>/<name>-<version>/desc`, but `desc` files are
/// picked up at any depth. Records come back in traversal order. The first
/// unreadable directory, unreadable file or malformed record fails the whole
/// scan.
#[tracing::instrument(skip(runtime, root))]
pub fn scan<R: Runtime>(runtime: &R, root: &Path) -> Result<RecordSet> {
    let mut records = Vec::new();
    scan_dir(runtime, root, &mut records)?;
    debug!("Found {} package record(s) under {:?}", records.len(), root);
    Ok(records)
}

fn scan_dir<R: Runtime>(runtime: &R, dir: &Path, records: &mut RecordSet) -> Result<()> {
    let entries = runtime.read_dir(dir).map_err(|e| Error::io(dir, e))?;

    for path in entries {
        if runtime.is_dir(&path) {
            scan_dir(runtime, &path, records)?;
        } else if path.file_name().is_some_and(|name| name == METADATA_FILE) {
            records.push(load_record(runtime, &path)?);
        }
    }

    Ok(())
}

fn load_record<R: Runtime>(runtime: &R, path: &Path) -> Result<PackageRecord> {
    let content = runtime.read(path).map_err(|e| Error::io(path, e))?;
    PackageRecord::parse(&content).map_err(|e| e.at_path(path.to_path_buf()))
}
