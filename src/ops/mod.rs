//! High-level operations.
//!
//! This module contains the implementation of mixlink commands.

pub mod configure;
pub mod externals;

pub use configure::{configure_package, configure_packages, ConfigurePackageError, ConfigureReport};
pub use externals::{load_external_map, parse_external_map};
