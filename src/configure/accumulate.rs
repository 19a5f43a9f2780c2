//! Configuring a package's components in order.

use crate::configure::component::ConfiguredComponent;
use crate::configure::errors::ConfigureError;
use crate::configure::identity::IdentityService;
use crate::configure::map::ConfiguredComponentMap;
use crate::configure::options::ConfigureOptions;
use crate::configure::resolve::configure_component;
use crate::core::{Component, PackageDescription};

/// Configure `components` one after another, starting from `dep_map`.
///
/// Each component is resolved against the map as it stands after every
/// earlier component was added, so `components` must already list a
/// component's internal dependencies before it. Nothing here sorts or
/// detects cycles; a dependency on a later sibling fails as unbuildable.
///
/// Stops at the first failure. On success, returns the configured
/// components in input order and the final map.
pub fn to_configured_components(
    package: &PackageDescription,
    components: &[Component],
    dep_map: &ConfiguredComponentMap,
    identity: &dyn IdentityService,
    options: &ConfigureOptions,
) -> Result<(Vec<ConfiguredComponent>, ConfiguredComponentMap), ConfigureError> {
    components.iter().try_fold(
        (Vec::with_capacity(components.len()), dep_map.clone()),
        |(mut configured, map), component| {
            let cc = configure_component(package, component, &map, &map, identity, options)?;
            let map = map.extend(&cc);
            configured.push(cc);
            Ok((configured, map))
        },
    )
}
