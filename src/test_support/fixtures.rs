//! Test fixtures for common configuration scenarios.

use semver::Version;

use crate::configure::ConfiguredComponentMap;
use crate::core::{AnnotatedId, Component, ComponentId, ComponentName, PackageDescription, PackageId, SpecVersion};

/// Version given to every fixture package.
pub const FIXTURE_VERSION: Version = Version::new(1, 0, 0);

/// An id for component `name` (e.g. `"lib:x"`) of package `pkg`.
///
/// # Panics
///
/// If `name` is not a valid component name.
pub fn annotated(pkg: &str, name: &str, id: &str) -> AnnotatedId {
    let name: ComponentName = name
        .parse()
        .unwrap_or_else(|e| panic!("bad fixture component name `{}`: {}", name, e));
    AnnotatedId::new(ComponentId::new(id), PackageId::new(pkg, FIXTURE_VERSION), name)
}

/// A map of already-configured external components, from
/// `(package, component name, id)` triples.
pub fn external_map(entries: &[(&str, &str, &str)]) -> ConfiguredComponentMap {
    entries
        .iter()
        .map(|&(pkg, name, id)| annotated(pkg, name, id))
        .collect()
}

/// A package description at version 1.0.0.
pub fn package(name: &str, spec_version: SpecVersion, components: Vec<Component>) -> PackageDescription {
    PackageDescription::new(PackageId::new(name, FIXTURE_VERSION), spec_version, components)
}

/// A description file declaring a library `P`, an internal library and an
/// executable, with a mix-in on an external library `A:x`.
pub const MIXIN_PACKAGE: &str = r#"[package]
name = "P"
version = "0.1.0"
spec-version = "2.0"

[library]
build-depends = [{ package = "A", libraries = ["x"] }, { package = "P", libraries = ["internal"] }]
mixins = [{ package = "A", library = "x", provides = { renames = [["M", "N"]], include-unrenamed = false } }]

[[sub-library]]
name = "internal"
build-depends = [{ package = "base" }]

[[executable]]
name = "server"
build-depends = [{ package = "P" }, { package = "base" }]
"#;

/// The external map [`MIXIN_PACKAGE`] configures against.
pub const MIXIN_EXTERNALS: &str = r#"[external.A]
version = "1.0.0"
components = { "lib" = "A-1.0.0-main", "lib:x" = "42" }

[external.base]
version = "4.18.0"
components = { "lib" = "base-4.18.0" }
"#;
