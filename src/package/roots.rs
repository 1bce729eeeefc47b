use std::collections::HashSet;

use super::{PackageRecord, RootSet};

/// Names of the records that no record lists as a dependency.
///
/// Input order is preserved. Self-references and dependency cycles exclude
/// their members like any other reference does.
pub fn compute_roots(records: &[PackageRecord]) -> RootSet {
    let required: HashSet<&str> = records
        .iter()
        .flat_map(|r| r.dependencies.iter().map(String::as_str))
        .collect();

    records
        .iter()
        .filter(|r| !required.contains(r.name.as_str()))
        .map(|r| r.name.clone())
        .collect()
}
