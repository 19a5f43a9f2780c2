//! Per-target versus package-wide library dependencies.
//!
//! Descriptions written before per-target dependencies existed expect every
//! component to see the public library of every other configured package.

use crate::core::{PackageDescription, SpecVersion};

/// First spec-version that resolves library dependencies per component.
pub const MODERN_POLICY_MIN_VERSION: SpecVersion = SpecVersion::new(1, 8);

/// Whether a package declaring `min_spec_version` uses per-component
/// dependency resolution.
pub fn modern_policy(min_spec_version: &SpecVersion) -> bool {
    *min_spec_version >= MODERN_POLICY_MIN_VERSION
}

/// How a package's library dependencies are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyPolicy {
    /// Each component depends on exactly what it lists.
    Modern,
    /// Each component depends on the main library of every other package.
    Legacy,
}

impl DependencyPolicy {
    pub fn for_spec_version(min_spec_version: &SpecVersion) -> Self {
        if modern_policy(min_spec_version) {
            DependencyPolicy::Modern
        } else {
            DependencyPolicy::Legacy
        }
    }

    pub fn for_package(package: &PackageDescription) -> Self {
        Self::for_spec_version(package.spec_version())
    }
}
