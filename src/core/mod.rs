//! Core data structures.
//!
//! This module contains the foundational types used throughout mixlink:
//! - Interned identifiers (PackageId, ComponentName, ComponentId)
//! - Package descriptions and their components
//! - Textual dependency, build-tool and mix-in declarations

pub mod annotated_id;
pub mod component;
pub mod component_name;
pub mod dependency;
pub mod manifest;
pub mod package_id;
pub mod renaming;
pub mod spec_version;

pub use annotated_id::{AnnotatedId, ComponentId};
pub use component::{BuildInfo, Component};
pub use component_name::{ComponentName, LibraryName, PackageName, UnqualComponentName};
pub use dependency::{ExeDependency, LibDependency, Mixin};
pub use manifest::{find_manifest, PackageDescription, MANIFEST_NAME};
pub use package_id::{parse_version, PackageId};
pub use renaming::{IncludeRenaming, ModuleName, ModuleRenaming};
pub use spec_version::SpecVersion;
