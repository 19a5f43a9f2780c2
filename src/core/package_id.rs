//! Package identification - name + version.
//!
//! PackageId identifies the package that owns a component. It's interned
//! for cheap comparison and cloning.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{LazyLock, RwLock};

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::PackageName;
use crate::util::InternedString;

/// Global package ID interner
static PACKAGE_INTERNER: LazyLock<RwLock<HashSet<&'static PackageIdInner>>> =
    LazyLock::new(|| RwLock::new(HashSet::new()));

/// A unique identifier for a package (interned).
///
/// PackageIds are cheap to clone and compare (pointer comparison).
#[derive(Clone, Copy)]
pub struct PackageId {
    inner: &'static PackageIdInner,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct PackageIdInner {
    name: PackageName,
    version: Version,
}

impl PackageId {
    /// Create a new package ID.
    pub fn new(name: impl Into<InternedString>, version: Version) -> Self {
        Self::intern(PackageIdInner {
            name: name.into(),
            version,
        })
    }

    fn intern(inner: PackageIdInner) -> Self {
        {
            let interner = PACKAGE_INTERNER.read().unwrap_or_else(|e| e.into_inner());
            if let Some(&interned) = interner.get(&inner) {
                return PackageId { inner: interned };
            }
        }

        let mut interner = PACKAGE_INTERNER.write().unwrap_or_else(|e| e.into_inner());
        if let Some(&interned) = interner.get(&inner) {
            return PackageId { inner: interned };
        }

        let leaked: &'static PackageIdInner = Box::leak(Box::new(inner));
        interner.insert(leaked);

        PackageId { inner: leaked }
    }

    /// Get the package name.
    pub fn name(&self) -> PackageName {
        self.inner.name
    }

    /// Get the package version.
    pub fn version(&self) -> &Version {
        &self.inner.version
    }

    /// Get a display string like "name v1.2.3"
    pub fn display_name(&self) -> String {
        format!("{} v{}", self.inner.name, self.inner.version)
    }
}

/// Parse a version written with one to three numeric parts, or as full
/// semver. Missing parts are zero, so `1.2` is `1.2.0`.
///
/// Four-part versions such as `4.18.0.0` have no semver form and are
/// rejected.
pub fn parse_version(s: &str) -> Option<Version> {
    let s = s.trim();
    if let Ok(version) = s.parse::<Version>() {
        return Some(version);
    }

    let parts = s
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    match parts.as_slice() {
        [major] => Some(Version::new(*major, 0, 0)),
        [major, minor] => Some(Version::new(*major, *minor, 0)),
        _ => None,
    }
}

impl PartialEq for PackageId {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.inner, other.inner)
    }
}

impl Eq for PackageId {}

impl Hash for PackageId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.inner, state)
    }
}

impl PartialOrd for PackageId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner
            .name
            .cmp(&other.inner.name)
            .then_with(|| self.inner.version.cmp(&other.inner.version))
    }
}

impl fmt::Debug for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageId")
            .field("name", &self.inner.name.as_str())
            .field("version", &self.inner.version)
            .finish()
    }
}

/// Displays as `name-1.2.3`, the prefix of generated component ids.
impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.inner.name, self.inner.version)
    }
}

impl Serialize for PackageId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct PackageIdData<'a> {
            name: &'a str,
            version: String,
        }

        PackageIdData {
            name: self.inner.name.as_str(),
            version: self.inner.version.to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PackageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PackageIdData {
            name: String,
            version: String,
        }

        let data = PackageIdData::deserialize(deserializer)?;
        let version = data.version.parse().map_err(serde::de::Error::custom)?;

        Ok(PackageId::new(data.name, version))
    }
}
