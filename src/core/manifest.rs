//! Mixlink.toml package descriptions.
//!
//! A package description lists the package's components and, for each, its
//! textual dependency declarations. It is read once and never modified.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::core::component::{BuildInfo, Component};
use crate::core::spec_version::SpecVersion;
use crate::core::{
    parse_version, ComponentName, LibraryName, PackageId, PackageName, UnqualComponentName,
};

/// Canonical package description file name.
pub const MANIFEST_NAME: &str = "Mixlink.toml";

/// A parsed package description.
#[derive(Debug, Clone)]
pub struct PackageDescription {
    package_id: PackageId,
    spec_version: SpecVersion,
    components: Vec<Component>,
}

/// `[package]` section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawPackage {
    name: String,
    version: String,
    #[serde(default)]
    spec_version: Option<SpecVersion>,
}

/// A component table that carries its own name.
#[derive(Debug, Deserialize)]
struct RawNamedComponent {
    name: UnqualComponentName,
    #[serde(flatten)]
    build_info: BuildInfo,
}

/// Raw description as deserialized from TOML.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawDescription {
    package: RawPackage,
    #[serde(default)]
    library: Option<BuildInfo>,
    #[serde(default)]
    sub_library: Vec<RawNamedComponent>,
    #[serde(default)]
    foreign_library: Vec<RawNamedComponent>,
    #[serde(default)]
    executable: Vec<RawNamedComponent>,
    #[serde(default)]
    test_suite: Vec<RawNamedComponent>,
    #[serde(default)]
    benchmark: Vec<RawNamedComponent>,
}

impl PackageDescription {
    /// Create a description from already-built parts.
    pub fn new(package_id: PackageId, spec_version: SpecVersion, components: Vec<Component>) -> Self {
        PackageDescription {
            package_id,
            spec_version,
            components,
        }
    }

    /// Load a description from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read package description: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("invalid package description: {}", path.display()))
    }

    /// Parse description content.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawDescription =
            toml::from_str(content).with_context(|| format!("failed to parse {}", MANIFEST_NAME))?;

        let version = parse_version(&raw.package.version).with_context(|| {
            format!(
                "invalid version `{}` (expected one to three numeric parts, e.g. `1.2.0`)",
                raw.package.version
            )
        })?;
        let package_id = PackageId::new(raw.package.name.as_str(), version);

        let spec_version = raw.package.spec_version.unwrap_or_else(|| {
            tracing::warn!(
                "package `{}` declares no spec-version, assuming {}",
                raw.package.name,
                SpecVersion::UNDECLARED
            );
            SpecVersion::UNDECLARED
        });

        // Same order the components are declared in by kind.
        let mut components = Vec::new();
        if let Some(build_info) = raw.library {
            components.push(Component {
                name: ComponentName::MAIN_LIBRARY,
                build_info,
            });
        }
        let named = [
            (
                raw.sub_library,
                (|name| ComponentName::Lib(LibraryName::Sub(name)))
                    as fn(UnqualComponentName) -> ComponentName,
            ),
            (raw.foreign_library, ComponentName::FLib),
            (raw.executable, ComponentName::Exe),
            (raw.test_suite, ComponentName::Test),
            (raw.benchmark, ComponentName::Bench),
        ];
        for (tables, make_name) in named {
            for table in tables {
                components.push(Component {
                    name: make_name(table.name),
                    build_info: table.build_info,
                });
            }
        }

        // Names are unique across kinds: ids only carry the unqualified name.
        let mut seen = HashMap::new();
        for component in &components {
            let Some(name) = component.name.unqualified() else {
                continue;
            };
            if let Some(previous) = seen.insert(name, component.name) {
                if previous == component.name {
                    bail!(
                        "component `{}` is declared more than once in package `{}`",
                        component.name,
                        package_id.name()
                    );
                }
                bail!(
                    "components `{}` and `{}` of package `{}` share the name `{}`",
                    previous,
                    component.name,
                    package_id.name(),
                    name
                );
            }
        }

        Ok(PackageDescription::new(package_id, spec_version, components))
    }

    pub fn package_id(&self) -> PackageId {
        self.package_id
    }

    pub fn name(&self) -> PackageName {
        self.package_id.name()
    }

    pub fn spec_version(&self) -> &SpecVersion {
        &self.spec_version
    }

    /// All declared components, buildable or not.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Components that can be built.
    pub fn buildable_components(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| c.is_buildable())
    }

    /// Whether the package declares an executable with this name.
    pub fn has_executable(&self, name: UnqualComponentName) -> bool {
        self.components
            .iter()
            .any(|c| c.name == ComponentName::Exe(name))
    }
}

/// Find the package description in `dir` or any of its parents.
pub fn find_manifest(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|d| d.join(MANIFEST_NAME))
        .find(|candidate| candidate.is_file())
}
