//! Loose version parsing for release tags and installed plugin versions.
//!
//! Tags are free-form (`v1.2.0`, `1.2.3.4`, `latest`, ...). Anything that is
//! not a dotted numeric version collapses to [`Version::MIN`] so that two
//! malformed strings always compare equal.

use std::fmt;

/// A dotted numeric version with up to four components.
///
/// Missing trailing components are zero, so `1.0` equals `1.0.0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version([u32; 4]);

impl Version {
    pub const MIN: Self = Self([0; 4]);

    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self([major, minor, build, revision])
    }

    /// Parse `text`, falling back to [`Version::MIN`] on malformed input.
    pub fn resolve(text: &str) -> Self {
        Self::parse(text).unwrap_or(Self::MIN)
    }

    /// Strict parse: optional leading `v`/`V`, then 2 to 4 numeric components.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);

        let mut parts = [0u32; 4];
        let mut count = 0;
        for component in text.split('.') {
            if count == parts.len() {
                return None;
            }
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            parts[count] = component.parse().ok()?;
            count += 1;
        }

        (count >= 2).then_some(Self(parts))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, build, revision] = self.0;
        write!(f, "{major}.{minor}.{build}.{revision}")
    }
}

/// `true` when `latest` resolves strictly greater than `current`.
///
/// Both sides go through [`Version::resolve`], so two malformed strings are
/// equal and a valid tag is newer than a malformed installed version.
pub fn is_newer(latest: &str, current: &str) -> bool {
    Version::resolve(latest) > Version::resolve(current)
}
