//! Dependency declarations as written in a package description.
//!
//! These are textual: they name packages and components, and are only tied to
//! concrete component ids during configuration.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::renaming::IncludeRenaming;
use crate::core::{LibraryName, PackageName, UnqualComponentName};

/// A `build-depends` entry: a package and the libraries wanted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibDependency {
    /// Package name
    pub package: PackageName,

    /// Requested libraries; the package's own name means its main library.
    /// Empty means just the main library.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<UnqualComponentName>,
}

impl LibDependency {
    /// Depend on the main library of `package`.
    pub fn new(package: impl Into<PackageName>) -> Self {
        LibDependency {
            package: package.into(),
            libraries: Vec::new(),
        }
    }

    /// Depend on specific libraries of the package instead.
    pub fn with_libraries(
        mut self,
        libraries: impl IntoIterator<Item = impl Into<UnqualComponentName>>,
    ) -> Self {
        self.libraries = libraries.into_iter().map(Into::into).collect();
        self
    }

    /// The requested libraries, sorted and without duplicates.
    pub fn library_names(&self) -> BTreeSet<LibraryName> {
        if self.libraries.is_empty() {
            return BTreeSet::from([LibraryName::Main]);
        }
        self.libraries
            .iter()
            .map(|&name| LibraryName::for_package(self.package, name))
            .collect()
    }
}

/// A `build-tool-depends` entry: an executable provided by a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExeDependency {
    pub package: PackageName,
    pub executable: UnqualComponentName,
}

impl ExeDependency {
    pub fn new(package: impl Into<PackageName>, executable: impl Into<UnqualComponentName>) -> Self {
        ExeDependency {
            package: package.into(),
            executable: executable.into(),
        }
    }
}

impl fmt::Display for ExeDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package, self.executable)
    }
}

/// A `mixins` entry: which library to mix in and how to rename its modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mixin {
    pub package: PackageName,

    /// Sub-library to mix in; the main library when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<UnqualComponentName>,

    #[serde(flatten)]
    pub renaming: IncludeRenaming,
}

impl Mixin {
    /// Mix in the main library of `package`.
    pub fn new(package: impl Into<PackageName>, renaming: IncludeRenaming) -> Self {
        Mixin {
            package: package.into(),
            library: None,
            renaming,
        }
    }

    /// Mix in a sub-library instead.
    pub fn with_library(mut self, library: impl Into<UnqualComponentName>) -> Self {
        self.library = Some(library.into());
        self
    }

    pub fn library_name(&self) -> LibraryName {
        match self.library {
            None => LibraryName::Main,
            Some(name) => LibraryName::for_package(self.package, name),
        }
    }
}

/// Displays as `pkg` or `pkg:lib`.
impl fmt::Display for Mixin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.library_name() {
            LibraryName::Main => write!(f, "{}", self.package),
            LibraryName::Sub(lib) => write!(f, "{}:{}", self.package, lib),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::renaming::ModuleRenaming;
    use crate::util::InternedString;

    #[test]
    fn test_library_names_default_to_main() {
        let dep = LibDependency::new("containers");
        assert_eq!(dep.library_names(), BTreeSet::from([LibraryName::Main]));
    }

    #[test]
    fn test_library_names_dedup_and_main_alias() {
        let dep = LibDependency::new("text").with_libraries(["text", "internal", "internal"]);

        let names: Vec<_> = dep.library_names().into_iter().collect();
        assert_eq!(
            names,
            vec![
                LibraryName::Main,
                LibraryName::Sub(InternedString::new("internal"))
            ]
        );
    }

    #[test]
    fn test_mixin_display() {
        let main = Mixin::new("str-sig", IncludeRenaming::default());
        assert_eq!(main.to_string(), "str-sig");
        assert_eq!(main.library_name(), LibraryName::Main);

        let sub = Mixin::new("A", IncludeRenaming::provides(ModuleRenaming::only([("M", "N")])))
            .with_library("x");
        assert_eq!(sub.to_string(), "A:x");
    }

    #[test]
    fn test_mixin_from_toml() {
        let mixin: Mixin = toml::from_str(
            r#"
package = "A"
library = "x"
provides = { renames = [["M", "N"]], include-unrenamed = false }
"#,
        )
        .unwrap();

        assert_eq!(mixin.library_name(), LibraryName::Sub(InternedString::new("x")));
        assert_eq!(mixin.renaming.provides, ModuleRenaming::only([("M", "N")]));
    }
}
