use log::debug;
use std::io::Write;
use std::time::Duration;

use crate::{
    error::Result,
    manifest::{JsonPrinter, PlaybookWriter, print_records},
    package::{RootSet, scan},
    runtime::Runtime,
    watcher::{ChangeWatcher, rebuild},
};

pub mod config;

pub use config::Config;

/// Print every package record as JSON
#[tracing::instrument(skip(runtime, out))]
pub fn records<R: Runtime, W: Write>(
    runtime: &R,
    config: &Config,
    limit: Option<usize>,
    out: &mut W,
) -> Result<()> {
    debug!("Scanning packages from {:?}", config.db_root);
    let records = scan(runtime, &config.db_root)?;
    print_records(out, &records, limit)
}

/// Print the root packages as a JSON array
#[tracing::instrument(skip(runtime, out))]
pub fn roots<R: Runtime, W: Write>(runtime: &R, config: &Config, out: W) -> Result<RootSet> {
    let mut printer = JsonPrinter::new(out);
    rebuild(runtime, &config.db_root, &mut printer)
}

/// Run one rebuild cycle into the playbook file
#[tracing::instrument(skip(runtime))]
pub fn playbook<R: Runtime>(runtime: &R, config: &Config) -> Result<RootSet> {
    let output = config.output()?.to_path_buf();
    let mut writer = PlaybookWriter::new(runtime, output);
    rebuild(runtime, &config.db_root, &mut writer)
}

/// Rewrite the playbook every time a package is installed or removed
#[tracing::instrument(skip(runtime))]
pub async fn watch<R: Runtime>(
    runtime: &R,
    config: &Config,
    initial: bool,
    settle: Duration,
) -> Result<()> {
    let output = config.output()?.to_path_buf();
    let writer = PlaybookWriter::new(runtime, output);
    ChangeWatcher::new(runtime, config.db_root.clone(), writer)
        .with_settle(settle)
        .watch(initial)
        .await
}
