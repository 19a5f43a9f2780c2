//! The map of configured components.
//!
//! Keyed by package name, then by component name. It only ever grows, and
//! growing it produces a new map: a map handed to a reader is never changed
//! underneath it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::configure::component::ConfiguredComponent;
use crate::core::{AnnotatedId, ComponentName, PackageName};

/// `PackageName -> (ComponentName -> AnnotatedId)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfiguredComponentMap {
    packages: BTreeMap<PackageName, BTreeMap<ComponentName, AnnotatedId>>,
}

impl ConfiguredComponentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already-configured component while building a map.
    ///
    /// Merges into the package's existing entries; an entry with the same
    /// component name is replaced.
    pub fn insert_external(&mut self, id: AnnotatedId) {
        self.packages
            .entry(id.package_name())
            .or_default()
            .insert(id.name, id);
    }

    /// A copy of this map that also contains `component`.
    pub fn extend(&self, component: &ConfiguredComponent) -> Self {
        let mut extended = self.clone();
        extended.insert_external(component.identity);
        extended
    }

    pub fn lookup(&self, package: PackageName, name: ComponentName) -> Option<&AnnotatedId> {
        self.packages.get(&package)?.get(&name)
    }

    pub fn lookup_package(&self, package: PackageName) -> Option<&BTreeMap<ComponentName, AnnotatedId>> {
        self.packages.get(&package)
    }

    /// Packages in name order.
    pub fn packages(&self) -> impl Iterator<Item = (PackageName, &BTreeMap<ComponentName, AnnotatedId>)> {
        self.packages.iter().map(|(name, components)| (*name, components))
    }

    /// Every component id, by package name and then component name.
    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedId> {
        self.packages.values().flat_map(|components| components.values())
    }

    /// Number of components across all packages.
    pub fn len(&self) -> usize {
        self.packages.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.values().all(BTreeMap::is_empty)
    }
}

impl FromIterator<AnnotatedId> for ConfiguredComponentMap {
    fn from_iter<I: IntoIterator<Item = AnnotatedId>>(iter: I) -> Self {
        let mut map = ConfiguredComponentMap::new();
        for id in iter {
            map.insert_external(id);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Component, ComponentId, PackageId};
    use crate::util::InternedString;
    use semver::Version;

    fn annotated(pkg: &str, name: ComponentName, id: &str) -> AnnotatedId {
        AnnotatedId::new(
            ComponentId::new(id),
            PackageId::new(pkg, Version::new(1, 0, 0)),
            name,
        )
    }

    #[test]
    fn test_insert_merges_package_entries() {
        let map: ConfiguredComponentMap = [
            annotated("A", ComponentName::MAIN_LIBRARY, "A-1"),
            annotated("A", ComponentName::sub_library("x"), "A-1-x"),
            annotated("B", ComponentName::MAIN_LIBRARY, "B-1"),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.len(), 3);
        let a = map.lookup_package(InternedString::new("A")).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(
            map.lookup(InternedString::new("A"), ComponentName::sub_library("x"))
                .map(|id| id.id.as_str()),
            Some("A-1-x")
        );
    }

    #[test]
    fn test_extend_leaves_original_untouched() {
        let base: ConfiguredComponentMap =
            [annotated("P", ComponentName::MAIN_LIBRARY, "P-1")].into_iter().collect();

        let component = ConfiguredComponent {
            identity: annotated("P", ComponentName::executable("server"), "P-1-server"),
            component: Component::executable("server"),
            is_public: false,
            tool_deps: Vec::new(),
            includes: Vec::new(),
        };

        let extended = base.extend(&component);

        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
        assert!(extended
            .lookup(InternedString::new("P"), ComponentName::MAIN_LIBRARY)
            .is_some());
    }

    #[test]
    fn test_packages_iterate_in_name_order() {
        let map: ConfiguredComponentMap = ["zlib", "base", "mtl"]
            .into_iter()
            .map(|p| annotated(p, ComponentName::MAIN_LIBRARY, p))
            .collect();

        let names: Vec<&str> = map.packages().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["base", "mtl", "zlib"]);
    }
}
