//! External dependency maps.
//!
//! Components configured outside the current run (installed packages, other
//! projects) are described in a TOML file:
//!
//! ```toml
//! [external.base]
//! version = "4.18.0"
//! components = { "lib" = "base-4.18.0" }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::configure::ConfiguredComponentMap;
use crate::core::{parse_version, AnnotatedId, ComponentId, ComponentName, PackageId};

#[derive(Debug, Default, Deserialize)]
struct RawExternalMap {
    #[serde(default)]
    external: BTreeMap<String, RawExternalPackage>,
}

#[derive(Debug, Deserialize)]
struct RawExternalPackage {
    version: String,
    #[serde(default)]
    components: BTreeMap<String, String>,
}

/// Parse an external dependency map.
pub fn parse_external_map(content: &str) -> Result<ConfiguredComponentMap> {
    let raw: RawExternalMap = toml::from_str(content).context("failed to parse dependency map")?;

    let mut map = ConfiguredComponentMap::new();
    for (name, package) in raw.external {
        let version = parse_version(&package.version).with_context(|| {
            format!(
                "invalid version for `{}`: `{}` (expected one to three numeric parts)",
                name, package.version
            )
        })?;
        let package_id = PackageId::new(name.as_str(), version);

        for (component, id) in package.components {
            let component: ComponentName = component
                .parse()
                .with_context(|| format!("invalid component name in `{}`", name))?;
            map.insert_external(AnnotatedId::new(ComponentId::new(id), package_id, component));
        }
    }

    Ok(map)
}

/// Load an external dependency map from a file.
pub fn load_external_map(path: &Path) -> Result<ConfiguredComponentMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dependency map: {}", path.display()))?;

    let map = parse_external_map(&content)
        .with_context(|| format!("invalid dependency map: {}", path.display()))?;
    tracing::debug!("loaded {} external components from {}", map.len(), path.display());

    Ok(map)
}
