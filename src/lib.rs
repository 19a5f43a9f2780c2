//! Mixlink - component configuration for mix-in linked packages
//!
//! This crate provides the core library functionality for Mixlink: it takes
//! package descriptions whose components declare library dependencies,
//! build-tool dependencies and mix-ins, and ties every declaration to the id
//! of an already-configured component.

pub mod configure;
pub mod core;
pub mod ops;
pub mod util;

/// Test fixtures and mocks for Mixlink unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use configure::{
    configure_component, to_configured_components, ConfigureError, ConfigureOptions,
    ConfiguredComponent, ConfiguredComponentMap, IdentityService,
};
pub use self::core::{
    AnnotatedId, Component, ComponentId, ComponentName, PackageDescription, PackageId,
};
pub use util::InternedString;
