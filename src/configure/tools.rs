//! Build-tool dependency collection.
//!
//! Components name the executables they need in three ways: explicit
//! `build-tool-depends`, legacy `build-tools` that give only an executable
//! name, and plain `build-depends` on packages known to ship a same-named
//! executable.

use std::collections::BTreeSet;

use crate::core::{BuildInfo, ExeDependency, PackageDescription, PackageName};
use crate::util::InternedString;

/// Legacy build-tool names understood without an explicit package.
pub const DEFAULT_KNOWN_TOOLS: &[&str] = &[
    "alex",
    "c2hs",
    "cpphs",
    "greencard",
    "haddock",
    "happy",
    "hsc2hs",
    "hscolour",
    "hspec-discover",
];

/// Caller-supplied conventions for turning tool-like declarations into
/// executable dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConventions {
    /// Legacy `build-tools` names that mean "package `n`, executable `n`"
    pub known_tools: BTreeSet<InternedString>,

    /// Packages whose plain dependency also implies their same-named executable
    pub tool_providing_packages: BTreeSet<PackageName>,
}

impl Default for ToolConventions {
    fn default() -> Self {
        ToolConventions {
            known_tools: DEFAULT_KNOWN_TOOLS.iter().map(InternedString::new).collect(),
            tool_providing_packages: BTreeSet::new(),
        }
    }
}

impl ToolConventions {
    /// Interpret one legacy `build-tools` name.
    ///
    /// An executable of the package itself wins over the known-tools list.
    fn desugar_legacy(&self, package: &PackageDescription, tool: InternedString) -> Option<ExeDependency> {
        if package.has_executable(tool) {
            Some(ExeDependency::new(package.name(), tool))
        } else if self.known_tools.contains(&tool) {
            Some(ExeDependency::new(tool, tool))
        } else {
            tracing::trace!("ignoring unknown build tool `{}`", tool);
            None
        }
    }
}

/// Every executable dependency a component declares, in declaration order.
///
/// May contain duplicates; the resolver removes them after lookup.
pub fn all_tool_dependencies(
    package: &PackageDescription,
    build_info: &BuildInfo,
    conventions: &ToolConventions,
) -> Vec<ExeDependency> {
    let explicit = build_info.build_tool_depends.iter().copied();

    let legacy = build_info
        .build_tools
        .iter()
        .filter_map(|&tool| conventions.desugar_legacy(package, tool));

    let implied = build_info
        .build_depends
        .iter()
        .filter(|dep| conventions.tool_providing_packages.contains(&dep.package))
        .map(|dep| ExeDependency::new(dep.package, dep.package));

    explicit.chain(legacy).chain(implied).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Component, LibDependency, PackageId, SpecVersion};
    use semver::Version;

    fn package(components: Vec<Component>) -> PackageDescription {
        PackageDescription::new(
            PackageId::new("P", Version::new(1, 0, 0)),
            SpecVersion::new(3, 0),
            components,
        )
    }

    #[test]
    fn test_explicit_legacy_and_implied() {
        let lib = Component::library()
            .with_build_tool_depends([ExeDependency::new("proto", "protoc")])
            .with_build_tools(["gen", "happy", "mystery"])
            .with_build_depends([LibDependency::new("hspec-discover"), LibDependency::new("base")]);
        let pkg = package(vec![lib.clone(), Component::executable("gen")]);

        let mut conventions = ToolConventions::default();
        conventions
            .tool_providing_packages
            .insert(InternedString::new("hspec-discover"));

        let tools = all_tool_dependencies(&pkg, &lib.build_info, &conventions);
        let rendered: Vec<String> = tools.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            rendered,
            vec![
                "proto:protoc",
                "P:gen",
                "happy:happy",
                "hspec-discover:hspec-discover"
            ]
        );
    }

    #[test]
    fn test_no_conventions() {
        let lib = Component::library().with_build_tools(["happy"]);
        let pkg = package(vec![lib.clone()]);

        let conventions = ToolConventions {
            known_tools: BTreeSet::new(),
            tool_providing_packages: BTreeSet::new(),
        };

        assert!(all_tool_dependencies(&pkg, &lib.build_info, &conventions).is_empty());
    }
}
