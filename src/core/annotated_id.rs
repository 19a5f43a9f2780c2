//! Component identities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{ComponentName, PackageId, PackageName};
use crate::util::InternedString;

/// The globally unique id of a configured component, e.g. `text-2.0.2-1f3a...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(InternedString);

impl ComponentId {
    pub fn new(id: impl Into<InternedString>) -> Self {
        ComponentId(id.into())
    }

    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        ComponentId::new(s)
    }
}

/// A component id together with the package that owns it and the name the
/// component was declared under.
///
/// Created once, when the component is configured (or when an external
/// dependency is registered), and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnnotatedId {
    pub id: ComponentId,
    pub package_id: PackageId,
    pub name: ComponentName,
}

impl AnnotatedId {
    pub fn new(id: ComponentId, package_id: PackageId, name: ComponentName) -> Self {
        AnnotatedId {
            id,
            package_id,
            name,
        }
    }

    pub fn package_name(&self) -> PackageName {
        self.package_id.name()
    }
}

impl fmt::Display for AnnotatedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
