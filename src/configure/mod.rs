//! Component configuration.
//!
//! Ties every textual dependency of a component (library dependencies,
//! build-tool dependencies and mix-ins) to the id of an already-configured
//! component, then assigns the component its own id:
//! - [`configure_component`] configures one component against given maps
//! - [`to_configured_components`] threads a map through a package's components
//! - [`order_components`] puts a package's components in dependency order

pub mod accumulate;
pub mod component;
pub mod errors;
pub mod identity;
pub mod map;
pub mod options;
pub mod order;
pub mod policy;
pub mod resolve;
pub mod tools;

pub use accumulate::to_configured_components;
pub use component::{ComponentInclude, ConfiguredComponent};
pub use errors::{ConfigureError, OrderError};
pub use identity::{FlagAssignment, HashedIdentity, IdentityRequest, IdentityService};
pub use map::ConfiguredComponentMap;
pub use options::ConfigureOptions;
pub use order::order_components;
pub use policy::{modern_policy, DependencyPolicy, MODERN_POLICY_MIN_VERSION};
pub use resolve::{
    configure_component, resolve_includes, resolve_library_dependencies, resolve_tool_dependencies,
};
pub use tools::{all_tool_dependencies, ToolConventions, DEFAULT_KNOWN_TOOLS};
