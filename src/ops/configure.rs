//! Configuring whole packages.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::configure::{
    order_components, to_configured_components, ConfigureError, ConfigureOptions,
    ConfiguredComponent, ConfiguredComponentMap, IdentityService, OrderError,
};
use crate::core::{PackageDescription, PackageId};
use crate::util::Diagnostic;

/// Result of configuring one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigureReport {
    pub package: PackageId,

    /// Configured components in dependency order
    pub components: Vec<ConfiguredComponent>,

    /// The external map plus every component configured here
    pub map: ConfiguredComponentMap,
}

impl ConfigureReport {
    /// Text rendering of every configured component, one block each.
    pub fn render_text(&self) -> String {
        self.components
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Failure to configure a package.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurePackageError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Component(#[from] ConfigureError),
}

impl ConfigurePackageError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigurePackageError::Order(e) => e.to_diagnostic(),
            ConfigurePackageError::Component(e) => e.to_diagnostic(),
        }
    }
}

/// Configure every buildable component of `package` against `external`.
///
/// Components are put in dependency order first, so siblings may be
/// declared in any order.
pub fn configure_package(
    package: &PackageDescription,
    external: &ConfiguredComponentMap,
    identity: &dyn IdentityService,
    options: &ConfigureOptions,
) -> Result<ConfigureReport, ConfigurePackageError> {
    let ordered = order_components(package, &options.tool_conventions)?;
    let (components, map) =
        to_configured_components(package, &ordered, external, identity, options)?;

    tracing::info!(
        "Configured {} ({} components, {} in map)",
        package.package_id().display_name(),
        components.len(),
        map.len()
    );

    Ok(ConfigureReport {
        package: package.package_id(),
        components,
        map,
    })
}

/// Configure independent packages against one external map, in parallel.
///
/// No package sees another's components. Results are in input order.
pub fn configure_packages(
    packages: &[PackageDescription],
    external: &ConfiguredComponentMap,
    identity: &(dyn IdentityService + Sync),
    options: &ConfigureOptions,
) -> Vec<Result<ConfigureReport, ConfigurePackageError>> {
    packages
        .par_iter()
        .map(|package| configure_package(package, external, identity, options))
        .collect()
}
