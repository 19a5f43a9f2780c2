//! Component names - which buildable unit inside a package.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::util::InternedString;

/// Name of a package, e.g. `containers`.
pub type PackageName = InternedString;

/// Name of a component without its kind, e.g. the `server` in `exe:server`.
pub type UnqualComponentName = InternedString;

/// Which library of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LibraryName {
    /// The package's public library, named after the package
    Main,
    /// A named sub-library
    Sub(UnqualComponentName),
}

impl LibraryName {
    /// Interpret a library name as written in a dependency on `package`.
    ///
    /// Naming the package itself refers to its main library.
    pub fn for_package(package: PackageName, name: UnqualComponentName) -> Self {
        if name == package {
            LibraryName::Main
        } else {
            LibraryName::Sub(name)
        }
    }

    /// Human readable form for messages: "main library" or "library `x`".
    pub fn describe(&self) -> String {
        match self {
            LibraryName::Main => "main library".to_string(),
            LibraryName::Sub(name) => format!("library `{}`", name),
        }
    }
}

/// The name of a component, qualified by its kind.
///
/// Ordering is total: libraries sort before foreign libraries, executables,
/// test suites and benchmarks, then by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentName {
    Lib(LibraryName),
    FLib(UnqualComponentName),
    Exe(UnqualComponentName),
    Test(UnqualComponentName),
    Bench(UnqualComponentName),
}

impl ComponentName {
    pub const MAIN_LIBRARY: ComponentName = ComponentName::Lib(LibraryName::Main);

    pub fn sub_library(name: impl Into<InternedString>) -> Self {
        ComponentName::Lib(LibraryName::Sub(name.into()))
    }

    pub fn executable(name: impl Into<InternedString>) -> Self {
        ComponentName::Exe(name.into())
    }

    pub fn is_main_library(&self) -> bool {
        *self == Self::MAIN_LIBRARY
    }

    /// The unqualified name, `None` for the main library.
    pub fn unqualified(&self) -> Option<UnqualComponentName> {
        match *self {
            ComponentName::Lib(LibraryName::Main) => None,
            ComponentName::Lib(LibraryName::Sub(name))
            | ComponentName::FLib(name)
            | ComponentName::Exe(name)
            | ComponentName::Test(name)
            | ComponentName::Bench(name) => Some(name),
        }
    }

    /// The kind prefix used in the textual form.
    pub fn kind_str(&self) -> &'static str {
        match self {
            ComponentName::Lib(_) => "lib",
            ComponentName::FLib(_) => "flib",
            ComponentName::Exe(_) => "exe",
            ComponentName::Test(_) => "test",
            ComponentName::Bench(_) => "bench",
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unqualified() {
            None => write!(f, "{}", self.kind_str()),
            Some(name) => write!(f, "{}:{}", self.kind_str(), name),
        }
    }
}

/// Error parsing a component name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComponentNameError {
    #[error("unknown component kind `{0}` (expected lib, flib, exe, test or bench)")]
    UnknownKind(String),

    #[error("component kind `{0}` requires a name, e.g. `{0}:name`")]
    MissingName(String),

    #[error("empty component name")]
    Empty,
}

impl FromStr for ComponentName {
    type Err = ComponentNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ComponentNameError::Empty);
        }

        let (kind, name) = match s.split_once(':') {
            Some((kind, name)) if name.is_empty() => {
                return Err(ComponentNameError::MissingName(kind.to_string()))
            }
            Some((kind, name)) => (kind, Some(InternedString::new(name))),
            None => (s, None),
        };

        let named = |make: fn(UnqualComponentName) -> ComponentName| {
            name.map(make)
                .ok_or_else(|| ComponentNameError::MissingName(kind.to_string()))
        };

        match kind {
            "lib" => Ok(match name {
                None => ComponentName::MAIN_LIBRARY,
                Some(name) => ComponentName::Lib(LibraryName::Sub(name)),
            }),
            "flib" => named(ComponentName::FLib),
            "exe" => named(ComponentName::Exe),
            "test" => named(ComponentName::Test),
            "bench" => named(ComponentName::Bench),
            other => Err(ComponentNameError::UnknownKind(other.to_string())),
        }
    }
}

impl Serialize for ComponentName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ComponentName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
