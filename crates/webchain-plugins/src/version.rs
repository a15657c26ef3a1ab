//! Version gating and install pinning.
//!
//! Legacy shortcuts only apply to projects whose service package is on the
//! `3.x` line. Official plugins installed by a pre-release tool are pinned to
//! the tool's own line.
//!
//! # Examples
//!
//! ```
//! use webchain_plugins::version::{InstallSpec, satisfies};
//!
//! assert!(satisfies("3.12.1", "3.x").unwrap());
//! assert!(!satisfies("4.5.0", "3.x").unwrap());
//!
//! let tool = semver::Version::parse("5.0.0-rc.1").unwrap();
//! let spec = InstallSpec::for_plugin("@vue/cli-plugin-pwa", true, &tool);
//! assert_eq!(spec.to_string(), "@vue/cli-plugin-pwa@^5.0.0-rc.1");
//! ```

use std::fmt;

use semver::{Version, VersionReq};
use tracing::debug;

use crate::error::{Error, Result};

/// Range of service versions for which legacy shortcuts apply.
pub const LEGACY_SHORTCUT_RANGE: &str = "3.x";

/// Parse a version string.
pub fn parse_version(version: &str) -> Result<Version> {
    Version::parse(version.trim()).map_err(|source| Error::InvalidVersion {
        version: version.to_string(),
        source,
    })
}

/// Whether `version` falls within `range`.
///
/// A leading `v` or `=` on the version is ignored. A version that still does
/// not parse (`3.1`, `latest`) is outside every range. Only a malformed
/// `range` is an error. Pre-release versions only match ranges that name a
/// pre-release.
pub fn satisfies(version: &str, range: &str) -> Result<bool> {
    let req = VersionReq::parse(range).map_err(|source| Error::InvalidRange {
        range: range.to_string(),
        source,
    })?;
    let cleaned = version.trim().trim_start_matches(['v', '=']);
    match Version::parse(cleaned) {
        Ok(parsed) => Ok(req.matches(&parsed)),
        Err(err) => {
            debug!(version, range, error = %err, "unparsable version, treating as out of range");
            Ok(false)
        }
    }
}

/// Package name plus optional version range, as handed to the package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSpec {
    pub name: String,
    pub range: Option<String>,
}

impl InstallSpec {
    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: None,
        }
    }

    /// Pin `name` to `^<tool_version>` when it is official and the tool is a
    /// pre-release; otherwise leave it floating.
    pub fn for_plugin(name: &str, official: bool, tool_version: &Version) -> Self {
        if official && !tool_version.pre.is_empty() {
            Self {
                name: name.to_string(),
                range: Some(format!("^{tool_version}")),
            }
        } else {
            Self::latest(name)
        }
    }
}

impl fmt::Display for InstallSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            Some(range) => write!(f, "{}@{range}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_range() {
        assert!(satisfies("3.0.0", LEGACY_SHORTCUT_RANGE).unwrap());
        assert!(satisfies("3.12.1", LEGACY_SHORTCUT_RANGE).unwrap());
        assert!(!satisfies("2.9.6", LEGACY_SHORTCUT_RANGE).unwrap());
        assert!(!satisfies("4.0.0", LEGACY_SHORTCUT_RANGE).unwrap());
    }

    #[test]
    fn test_prerelease_outside_plain_range() {
        assert!(!satisfies("3.0.0-beta.1", LEGACY_SHORTCUT_RANGE).unwrap());
    }

    #[test]
    fn test_loose_version_prefixes() {
        assert!(satisfies("v3.12.1", LEGACY_SHORTCUT_RANGE).unwrap());
        assert!(satisfies("=3.0.0", LEGACY_SHORTCUT_RANGE).unwrap());
        assert!(satisfies(" v3.5.0 ", LEGACY_SHORTCUT_RANGE).unwrap());
    }

    #[test]
    fn test_unparsable_version_is_out_of_range() {
        assert!(!satisfies("3.1", LEGACY_SHORTCUT_RANGE).unwrap());
        assert!(!satisfies("latest", LEGACY_SHORTCUT_RANGE).unwrap());
        assert!(!satisfies("three", LEGACY_SHORTCUT_RANGE).unwrap());
    }

    #[test]
    fn test_invalid_range_rejected() {
        let err = satisfies("3.0.0", "not a range").unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }), "{err:?}");
    }

    #[test]
    fn test_stable_tool_never_pins() {
        let tool = Version::new(5, 0, 8);
        let spec = InstallSpec::for_plugin("@vue/cli-plugin-pwa", true, &tool);
        assert_eq!(spec.range, None);
        assert_eq!(spec.to_string(), "@vue/cli-plugin-pwa");
    }

    #[test]
    fn test_prerelease_tool_pins_official_only() {
        let tool = parse_version("5.0.0-beta.3").unwrap();
        let official = InstallSpec::for_plugin("@vue/cli-plugin-pwa", true, &tool);
        assert_eq!(official.range.as_deref(), Some("^5.0.0-beta.3"));

        let community = InstallSpec::for_plugin("vue-cli-plugin-foo", false, &tool);
        assert_eq!(community.range, None);
    }
}
