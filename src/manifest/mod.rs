//! Sinks for the result of a rebuild cycle.
//!
//! - `playbook` - Ansible playbook written to the configured output file
//! - `json` - JSON dumps of records and roots to any writer

mod json;
mod playbook;

pub use json::{JsonPrinter, print_records};
pub use playbook::{PlaybookWriter, render_playbook};

use crate::error::Result;

/// Receives the root set computed by each rebuild cycle.
#[cfg_attr(test, mockall::automock)]
pub trait Emitter {
    fn emit(&mut self, roots: &[String]) -> Result<()>;
}
