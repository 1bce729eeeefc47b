//! Package metadata module
//!
//! This module reads the package manager's local database: parsing `desc`
//! records, discovering them in the tree, and deriving the root packages.

mod discovery;
mod record;
mod roots;

pub use discovery::{METADATA_FILE, scan};
pub use record::{PackageRecord, strip_version};
pub use roots::compute_roots;

/// Every record found by one scan, in traversal order.
pub type RecordSet = Vec<PackageRecord>;

/// Names of the packages that nothing else depends on.
pub type RootSet = Vec<String>;
