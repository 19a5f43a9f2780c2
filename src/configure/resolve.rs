//! Configuring a single component.
//!
//! Library dependencies, build-tool dependencies and mix-ins are resolved
//! against maps of already-configured components, then the component gets
//! its id. Any failure aborts the component; nothing partial is returned.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, trace};

use crate::configure::component::{ComponentInclude, ConfiguredComponent};
use crate::configure::errors::ConfigureError;
use crate::configure::identity::{IdentityRequest, IdentityService};
use crate::configure::map::ConfiguredComponentMap;
use crate::configure::options::ConfigureOptions;
use crate::configure::policy::DependencyPolicy;
use crate::configure::tools::all_tool_dependencies;
use crate::core::{
    AnnotatedId, Component, ComponentId, ComponentName, ExeDependency, LibDependency, Mixin,
    PackageDescription, PackageName,
};

/// Resolve a component's library dependencies.
///
/// Under [`DependencyPolicy::Modern`] every requested library of every
/// `build-depends` entry must be present in `lib_map`. Under
/// [`DependencyPolicy::Legacy`] the declarations are ignored and the result
/// is the main library of every other package in `lib_map`.
///
/// Duplicates are kept; each becomes its own include.
pub fn resolve_library_dependencies(
    policy: DependencyPolicy,
    package: PackageName,
    component: ComponentName,
    build_depends: &[LibDependency],
    lib_map: &ConfiguredComponentMap,
) -> Result<Vec<AnnotatedId>, ConfigureError> {
    match policy {
        DependencyPolicy::Modern => modern_library_dependencies(component, build_depends, lib_map),
        DependencyPolicy::Legacy => Ok(legacy_library_dependencies(package, lib_map)),
    }
}

fn modern_library_dependencies(
    component: ComponentName,
    build_depends: &[LibDependency],
    lib_map: &ConfiguredComponentMap,
) -> Result<Vec<AnnotatedId>, ConfigureError> {
    let mut resolved = Vec::new();

    for dep in build_depends {
        let provided = lib_map.lookup_package(dep.package).ok_or(
            ConfigureError::UnresolvedLibraryDependency {
                component,
                package: dep.package,
            },
        )?;

        for library in dep.library_names() {
            let id = provided.get(&ComponentName::Lib(library)).ok_or(
                ConfigureError::UnresolvedSublibrary {
                    component,
                    package: dep.package,
                    library,
                },
            )?;
            resolved.push(*id);
        }
    }

    Ok(resolved)
}

/// Main libraries of every package except `package` itself, in package name
/// order.
fn legacy_library_dependencies(
    package: PackageName,
    lib_map: &ConfiguredComponentMap,
) -> Vec<AnnotatedId> {
    lib_map
        .packages()
        .filter(|(name, _)| *name != package)
        .filter_map(|(_, components)| components.get(&ComponentName::MAIN_LIBRARY).copied())
        .collect()
}

/// Resolve executable dependencies against `exe_map`.
///
/// Executables missing from the map are assumed to be installed outside
/// this system and are skipped without error. The result has no two entries
/// with the same id and keeps first-occurrence order.
pub fn resolve_tool_dependencies(
    declared: &[ExeDependency],
    exe_map: &ConfiguredComponentMap,
) -> Vec<AnnotatedId> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for dep in declared {
        match exe_map.lookup(dep.package, ComponentName::Exe(dep.executable)) {
            Some(id) => {
                if seen.insert(id.id) {
                    resolved.push(*id);
                }
            }
            None => trace!("build tool `{}` is not configured here, assuming it is installed", dep),
        }
    }

    resolved
}

/// Turn mix-in declarations and library dependencies into includes.
///
/// Each mix-in must name one of `lib_deps`. Library dependencies no mix-in
/// names become implicit includes. Explicit includes come first.
pub fn resolve_includes(
    component: ComponentName,
    mixins: &[Mixin],
    lib_deps: &[AnnotatedId],
) -> Result<Vec<ComponentInclude>, ConfigureError> {
    let by_name: HashMap<(PackageName, ComponentName), &AnnotatedId> = lib_deps
        .iter()
        .map(|id| ((id.package_name(), id.name), id))
        .collect();

    let explicit = mixins
        .iter()
        .map(|mixin| {
            let key = (mixin.package, ComponentName::Lib(mixin.library_name()));
            by_name
                .get(&key)
                .map(|&&target| ComponentInclude::explicit(target, mixin.renaming.clone()))
                .ok_or_else(|| ConfigureError::UnresolvedMixin {
                    component,
                    mixin: mixin.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let used: HashSet<ComponentId> = explicit.iter().map(ComponentInclude::id).collect();
    let implicit = lib_deps
        .iter()
        .filter(|id| !used.contains(&id.id))
        .map(|&id| ComponentInclude::implicit(id));

    Ok(explicit.into_iter().chain(implicit).collect())
}

/// Every component id in `map`, sorted and deduplicated.
fn known_dependency_ids(map: &ConfiguredComponentMap) -> Vec<ComponentId> {
    map.iter()
        .map(|id| id.id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Configure one component of `package`.
///
/// `lib_map` and `exe_map` hold the components this one may depend on;
/// when configuring a whole package they are the same map.
pub fn configure_component(
    package: &PackageDescription,
    component: &Component,
    lib_map: &ConfiguredComponentMap,
    exe_map: &ConfiguredComponentMap,
    identity: &dyn IdentityService,
    options: &ConfigureOptions,
) -> Result<ConfiguredComponent, ConfigureError> {
    let name = component.name;
    let build_info = &component.build_info;
    let policy = DependencyPolicy::for_package(package);

    let lib_deps = resolve_library_dependencies(
        policy,
        package.name(),
        name,
        &build_info.build_depends,
        lib_map,
    )?;

    let declared_tools = all_tool_dependencies(package, build_info, &options.tool_conventions);
    let tool_deps = resolve_tool_dependencies(&declared_tools, exe_map);

    let includes = resolve_includes(name, &build_info.mixins, &lib_deps)?;

    let dep_ids = known_dependency_ids(lib_map);
    let id = identity.compute_identity(&IdentityRequest {
        deterministic: options.deterministic,
        override_id: options.ipid_override.as_deref(),
        override_computed_id: options.cid_override,
        package_id: package.package_id(),
        component_name: name,
        deps_and_flags: Some((dep_ids.as_slice(), &options.flags)),
    });

    let configured = ConfiguredComponent {
        identity: AnnotatedId::new(id, package.package_id(), name),
        component: component.clone(),
        is_public: options.force_public || name.is_main_library(),
        tool_deps,
        includes,
    };

    debug!(
        "configured `{}` as {} ({:?} policy, {} explicit and {} implicit includes, {} tools)",
        name,
        configured.id(),
        policy,
        configured.explicit_includes().count(),
        configured.implicit_includes().count(),
        configured.tool_deps.len()
    );

    Ok(configured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configure::identity::HashedIdentity;
    use crate::core::{IncludeRenaming, LibraryName, ModuleRenaming, SpecVersion};
    use crate::test_support::{annotated, external_map, package};
    use crate::util::InternedString;

    fn name(s: &str) -> PackageName {
        InternedString::new(s)
    }

    #[test]
    fn test_modern_resolves_requested_libraries() {
        let map = external_map(&[
            ("A", "lib", "A-main"),
            ("A", "lib:x", "A-x"),
            ("B", "lib", "B-main"),
        ]);
        let deps = [
            LibDependency::new("A").with_libraries(["A", "x"]),
            LibDependency::new("B"),
        ];

        let resolved = resolve_library_dependencies(
            DependencyPolicy::Modern,
            name("P"),
            ComponentName::MAIN_LIBRARY,
            &deps,
            &map,
        )
        .unwrap();

        let ids: Vec<&str> = resolved.iter().map(|id| id.id.as_str()).collect();
        assert_eq!(ids, vec!["A-main", "A-x", "B-main"]);
    }

    #[test]
    fn test_modern_missing_package() {
        let map = external_map(&[("A", "lib", "A-main")]);
        let err = resolve_library_dependencies(
            DependencyPolicy::Modern,
            name("P"),
            ComponentName::executable("server"),
            &[LibDependency::new("A"), LibDependency::new("text")],
            &map,
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigureError::UnresolvedLibraryDependency {
                component: ComponentName::executable("server"),
                package: name("text"),
            }
        );
    }

    #[test]
    fn test_modern_missing_sublibrary() {
        let map = external_map(&[("A", "lib", "A-main")]);
        let err = resolve_library_dependencies(
            DependencyPolicy::Modern,
            name("P"),
            ComponentName::MAIN_LIBRARY,
            &[LibDependency::new("A").with_libraries(["x"])],
            &map,
        )
        .unwrap_err();

        assert_eq!(
            err,
            ConfigureError::UnresolvedSublibrary {
                component: ComponentName::MAIN_LIBRARY,
                package: name("A"),
                library: LibraryName::Sub(name("x")),
            }
        );
    }

    #[test]
    fn test_legacy_takes_every_other_main_library() {
        let map = external_map(&[
            ("zlib", "lib", "zlib-main"),
            ("P", "lib", "P-main"),
            ("base", "lib", "base-main"),
            ("base", "lib:internal", "base-internal"),
            ("tools", "exe:gen", "tools-gen"),
        ]);

        let resolved = resolve_library_dependencies(
            DependencyPolicy::Legacy,
            name("P"),
            ComponentName::executable("server"),
            // Ignored under the legacy policy, even though it is unresolvable.
            &[LibDependency::new("missing")],
            &map,
        )
        .unwrap();

        let ids: Vec<&str> = resolved.iter().map(|id| id.id.as_str()).collect();
        assert_eq!(ids, vec!["base-main", "zlib-main"]);
    }

    #[test]
    fn test_tool_deps_dedup_and_skip_unknown() {
        let map = external_map(&[("happy", "exe:happy", "happy-1"), ("alex", "exe:alex", "alex-1")]);
        let declared = [
            ExeDependency::new("happy", "happy"),
            ExeDependency::new("system", "pkg-config"),
            ExeDependency::new("alex", "alex"),
            ExeDependency::new("happy", "happy"),
        ];

        let resolved = resolve_tool_dependencies(&declared, &map);
        let ids: Vec<&str> = resolved.iter().map(|id| id.id.as_str()).collect();
        assert_eq!(ids, vec!["happy-1", "alex-1"]);
    }

    #[test]
    fn test_includes_explicit_first_then_implicit() {
        let a_x = annotated("A", "lib:x", "42");
        let base = annotated("base", "lib", "base-4");
        let renaming = IncludeRenaming::provides(ModuleRenaming::only([("M", "N")]));
        let mixins = [Mixin::new("A", renaming.clone()).with_library("x")];

        let includes =
            resolve_includes(ComponentName::MAIN_LIBRARY, &mixins, &[base, a_x]).unwrap();

        assert_eq!(
            includes,
            vec![
                ComponentInclude::explicit(a_x, renaming),
                ComponentInclude::implicit(base),
            ]
        );
    }

    #[test]
    fn test_same_dependency_mixed_in_twice() {
        let sig = annotated("str-sig", "lib", "sig-1");
        let first = IncludeRenaming::provides(ModuleRenaming::only([("Str", "Str.String")]));
        let second = IncludeRenaming::provides(ModuleRenaming::only([("Str", "Str.Text")]));
        let mixins = [
            Mixin::new("str-sig", first.clone()),
            Mixin::new("str-sig", second.clone()),
        ];

        let includes = resolve_includes(ComponentName::MAIN_LIBRARY, &mixins, &[sig]).unwrap();

        assert_eq!(
            includes,
            vec![
                ComponentInclude::explicit(sig, first),
                ComponentInclude::explicit(sig, second),
            ]
        );
    }

    #[test]
    fn test_mixed_in_dependency_is_never_implicit() {
        let a = annotated("A", "lib", "A-1");
        let b = annotated("B", "lib", "B-1");
        let renaming = IncludeRenaming::provides(ModuleRenaming::only([("M", "N")]));
        let mixins = [Mixin::new("A", renaming.clone())];

        // `A` is listed twice, as two build-depends entries would.
        let includes =
            resolve_includes(ComponentName::MAIN_LIBRARY, &mixins, &[a, b, a]).unwrap();

        assert_eq!(
            includes,
            vec![
                ComponentInclude::explicit(a, renaming),
                ComponentInclude::implicit(b),
            ]
        );
        let targets: BTreeSet<ComponentId> = includes.iter().map(ComponentInclude::id).collect();
        let deps: BTreeSet<ComponentId> = [a.id, b.id].into_iter().collect();
        assert_eq!(targets, deps);
    }

    #[test]
    fn test_mixin_not_a_dependency() {
        let mixins = [Mixin::new("A", IncludeRenaming::default()).with_library("y")];
        let err = resolve_includes(
            ComponentName::MAIN_LIBRARY,
            &mixins,
            &[annotated("A", "lib:x", "42")],
        )
        .unwrap_err();

        assert!(matches!(err, ConfigureError::UnresolvedMixin { ref mixin, .. } if mixin.to_string() == "A:y"));
    }

    #[test]
    fn test_configure_component_end_to_end() {
        let renaming = IncludeRenaming::provides(ModuleRenaming::only([("M", "N")]));
        let lib = Component::library()
            .with_build_depends([LibDependency::new("A").with_libraries(["x"])])
            .with_mixins([Mixin::new("A", renaming.clone()).with_library("x")]);
        let pkg = package("P", SpecVersion::new(2, 0), vec![lib.clone()]);
        let map = external_map(&[("A", "lib:x", "42")]);

        let configured = configure_component(
            &pkg,
            &lib,
            &map,
            &map,
            &HashedIdentity::new(),
            &ConfigureOptions::default(),
        )
        .unwrap();

        assert!(configured.is_public);
        assert_eq!(configured.name(), ComponentName::MAIN_LIBRARY);
        assert_eq!(configured.package_id(), pkg.package_id());
        assert_eq!(
            configured.includes,
            vec![ComponentInclude::explicit(annotated("A", "lib:x", "42"), renaming)]
        );
        assert!(configured.tool_deps.is_empty());
    }

    #[test]
    fn test_force_public() {
        let exe = Component::executable("server");
        let pkg = package("P", SpecVersion::new(3, 0), vec![exe.clone()]);
        let map = ConfiguredComponentMap::new();
        let identity = HashedIdentity::new();

        let private =
            configure_component(&pkg, &exe, &map, &map, &identity, &ConfigureOptions::default())
                .unwrap();
        assert!(!private.is_public);

        let options = ConfigureOptions {
            force_public: true,
            ..ConfigureOptions::default()
        };
        let public = configure_component(&pkg, &exe, &map, &map, &identity, &options).unwrap();
        assert!(public.is_public);
    }
}
