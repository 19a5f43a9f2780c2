//! The description-format version a package declares it needs.

use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::core::package_id::parse_version;

/// Minimum description-format version, e.g. `1.8` or `3.0`.
///
/// Written with one to three numeric parts; missing parts are zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecVersion(Version);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid spec-version `{0}` (expected e.g. `1.8` or `3.0`)")]
pub struct SpecVersionError(String);

impl SpecVersion {
    /// Version assumed for descriptions that do not declare one.
    pub const UNDECLARED: SpecVersion = SpecVersion::new(1, 0);

    pub const fn new(major: u64, minor: u64) -> Self {
        SpecVersion(Version::new(major, minor, 0))
    }
}

impl Default for SpecVersion {
    fn default() -> Self {
        Self::UNDECLARED
    }
}

impl FromStr for SpecVersion {
    type Err = SpecVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
            .map(SpecVersion)
            .ok_or_else(|| SpecVersionError(s.trim().to_string()))
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = &self.0;
        if v.patch == 0 && v.pre.is_empty() {
            write!(f, "{}.{}", v.major, v.minor)
        } else {
            write!(f, "{}", v)
        }
    }
}

impl Serialize for SpecVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpecVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!("1.8".parse::<SpecVersion>().unwrap(), SpecVersion::new(1, 8));
        assert_eq!("3".parse::<SpecVersion>().unwrap(), SpecVersion::new(3, 0));
        let patch: SpecVersion = "1.7.1".parse().unwrap();
        assert!(patch > SpecVersion::new(1, 7));
        assert!(patch < SpecVersion::new(1, 8));
        assert!("1.x".parse::<SpecVersion>().is_err());
        assert!("".parse::<SpecVersion>().is_err());
    }

    #[test]
    fn test_ordering() {
        let v1_10: SpecVersion = "1.10".parse().unwrap();
        assert!(SpecVersion::new(1, 8) < v1_10);
        assert!(SpecVersion::new(1, 8) > "1.7.1".parse().unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(SpecVersion::new(2, 4).to_string(), "2.4");
        assert_eq!("1.7.1".parse::<SpecVersion>().unwrap().to_string(), "1.7.1");
    }
}
