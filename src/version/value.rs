//! Game version identifiers (`M.m.p` and `M.m.p-ptb`)

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::version::error::VersionError;

/// Suffix marking a public test build
pub const PTB_SUFFIX: &str = "-ptb";

/// One release of the game as named by the developer.
///
/// Components are opaque tokens: they are never checked to be numeric and are
/// compared as plain strings, so `"10"` sorts before `"7"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameVersion {
    pub major: String,
    pub minor: String,
    pub patch: String,
    /// `false` for a public test build of the same major.minor.patch
    pub is_release: bool,
}

impl GameVersion {
    pub fn new(
        major: impl Into<String>,
        minor: impl Into<String>,
        patch: impl Into<String>,
        is_release: bool,
    ) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
            patch: patch.into(),
            is_release,
        }
    }

    pub fn is_ptb(&self) -> bool {
        !self.is_release
    }

    /// Name without the `-ptb` suffix
    pub fn base_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// `(major, minor, patch, is_ptb)`
    pub fn info_tuple(&self) -> (&str, &str, &str, bool) {
        (&self.major, &self.minor, &self.patch, self.is_ptb())
    }

    pub fn to_str(&self) -> String {
        self.to_string()
    }
}

/// Total order over game versions.
///
/// Fields are compared in the fixed sequence major, minor, patch and then the
/// release flag, where a PTB sorts before the release it precedes
/// (`7.5.0-ptb < 7.5.0`).
// FIXME: components compare lexically ("10.0.0" < "7.0.0"); switch to numeric
// ordering once the catalog reaches a two-digit major.
pub fn compare_versions(a: &GameVersion, b: &GameVersion) -> Ordering {
    a.major
        .cmp(&b.major)
        .then_with(|| a.minor.cmp(&b.minor))
        .then_with(|| a.patch.cmp(&b.patch))
        .then_with(|| a.is_release.cmp(&b.is_release))
}

impl Ord for GameVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_versions(self, other)
    }
}

impl PartialOrd for GameVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for GameVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(VersionError::Malformed {
                input: s.to_string(),
            });
        };

        let (patch, is_release) = match patch.strip_suffix(PTB_SUFFIX) {
            Some(stripped) => (stripped, false),
            None => (*patch, true),
        };

        Ok(Self::new(*major, *minor, patch, is_release))
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.is_release {
            f.write_str(PTB_SUFFIX)?;
        }
        Ok(())
    }
}

impl Serialize for GameVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
