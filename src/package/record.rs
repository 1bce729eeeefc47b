use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const NAME_SECTION: &str = "%NAME%\n";
const DEPENDS_SECTION: &str = "%DEPENDS%\n";

/// Version comparators, in the order they are checked when stripping.
const VERSION_SEPARATORS: [char; 3] = ['<', '>', '='];

/// One installed package as declared by its `desc` file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageRecord {
    #[serde(rename = "package_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl PackageRecord {
    /// Parse the content of a `desc` file.
    ///
    /// `%NAME%` is mandatory and its first value line becomes the name.
    /// `%DEPENDS%` is optional; each of its lines is stripped of any version
    /// comparator.
    pub fn parse(content: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(content);

        let name = yank_section(&text, NAME_SECTION)
            .ok_or_else(|| Error::malformed("missing name section"))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed("empty name section"))?
            .to_string();

        let dependencies = yank_section(&text, DEPENDS_SECTION)
            .unwrap_or_default()
            .into_iter()
            .map(|line| strip_version(line).to_string())
            .collect();

        Ok(PackageRecord { name, dependencies })
    }
}

/// Value lines of the section introduced by `tag`, or `None` when the tag is absent.
///
/// The section text runs from the first occurrence of the tag up to the next
/// one. Lines are collected until a blank line or another section tag.
fn yank_section<'a>(text: &'a str, tag: &str) -> Option<Vec<&'a str>> {
    let section = text.split(tag).nth(1)?;
    Some(
        section
            .split('\n')
            .take_while(|line| !line.is_empty() && !is_section_tag(line))
            .collect(),
    )
}

fn is_section_tag(line: &str) -> bool {
    line.starts_with('%') && line.ends_with('%')
}

/// Drop the version constraint from a dependency such as `glibc>=2.38`.
///
/// The separator is the first of `<`, `>`, `=` (in that order) that the line
/// contains, not the leftmost one in the line.
pub fn strip_version(dependency: &str) -> &str {
    VERSION_SEPARATORS
        .iter()
        .find_map(|sep| dependency.split_once(*sep))
        .map_or(dependency, |(name, _)| name)
}
