//! Dependency order of a package's own components.

use std::collections::HashMap;

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::configure::errors::OrderError;
use crate::configure::policy::DependencyPolicy;
use crate::configure::tools::{all_tool_dependencies, ToolConventions};
use crate::core::{Component, ComponentName, PackageDescription};

/// Order the buildable components of `package` so that every component
/// comes after the sibling libraries and executables it depends on.
///
/// Unbuildable components are left out. Dependencies on siblings that do not
/// exist add no edge; configuring the component reports them instead.
pub fn order_components(
    package: &PackageDescription,
    conventions: &ToolConventions,
) -> Result<Vec<Component>, OrderError> {
    let mut graph: DiGraph<&Component, ()> = DiGraph::new();
    let mut nodes: HashMap<ComponentName, NodeIndex> = HashMap::new();

    for component in package.buildable_components() {
        nodes.insert(component.name, graph.add_node(component));
    }

    let own = package.name();
    let modern = DependencyPolicy::for_package(package) == DependencyPolicy::Modern;

    for component in package.buildable_components() {
        let dependent = nodes[&component.name];

        // Legacy packages never depend on their own libraries.
        let libraries = component
            .build_info
            .build_depends
            .iter()
            .filter(|dep| modern && dep.package == own)
            .flat_map(|dep| dep.library_names())
            .map(ComponentName::Lib);

        let tools = all_tool_dependencies(package, &component.build_info, conventions)
            .into_iter()
            .filter(|dep| dep.package == own)
            .map(|dep| ComponentName::Exe(dep.executable));

        for dependency in libraries.chain(tools) {
            if let Some(&dep_node) = nodes.get(&dependency) {
                // Edges point from a dependency to its dependent.
                graph.update_edge(dep_node, dependent, ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(order) => Ok(order.into_iter().map(|node| graph[node].clone()).collect()),
        Err(cycle) => {
            let start = cycle.node_id();
            let mut members = tarjan_scc(&graph)
                .into_iter()
                .find(|scc| scc.contains(&start))
                .unwrap_or_else(|| vec![start]);
            members.sort();

            Err(OrderError::Cycle {
                package: own,
                components: members.into_iter().map(|node| graph[node].name).collect(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExeDependency, LibDependency, SpecVersion};
    use crate::test_support::package;

    fn position(order: &[Component], name: ComponentName) -> usize {
        order.iter().position(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_dependencies_come_first() {
        let pkg = package(
            "P",
            SpecVersion::new(3, 0),
            vec![
                Component::executable("server")
                    .with_build_depends([LibDependency::new("P")])
                    .with_build_tool_depends([ExeDependency::new("P", "gen")]),
                Component::library()
                    .with_build_depends([LibDependency::new("P").with_libraries(["internal"])]),
                Component::executable("gen"),
                Component::sub_library("internal"),
                Component::test_suite("unit").unbuildable(),
            ],
        );

        let order = order_components(&pkg, &ToolConventions::default()).unwrap();

        assert_eq!(order.len(), 4);
        let internal = position(&order, ComponentName::sub_library("internal"));
        let lib = position(&order, ComponentName::MAIN_LIBRARY);
        let gen = position(&order, ComponentName::executable("gen"));
        let server = position(&order, ComponentName::executable("server"));
        assert!(internal < lib);
        assert!(lib < server);
        assert!(gen < server);
    }

    #[test]
    fn test_legacy_tool_names_order_own_executables() {
        let pkg = package(
            "P",
            SpecVersion::new(1, 2),
            vec![
                Component::library().with_build_tools(["gen"]),
                Component::executable("gen"),
            ],
        );

        let order = order_components(&pkg, &ToolConventions::default()).unwrap();
        let names: Vec<String> = order.iter().map(|c| c.name.to_string()).collect();
        assert_eq!(names, vec!["exe:gen", "lib"]);
    }

    #[test]
    fn test_cycle_is_reported() {
        let pkg = package(
            "P",
            SpecVersion::new(3, 0),
            vec![
                Component::sub_library("a")
                    .with_build_depends([LibDependency::new("P").with_libraries(["b"])]),
                Component::sub_library("b")
                    .with_build_depends([LibDependency::new("P").with_libraries(["a"])]),
                Component::executable("ok"),
            ],
        );

        let err = order_components(&pkg, &ToolConventions::default()).unwrap_err();
        assert_eq!(
            err,
            OrderError::Cycle {
                package: pkg.name(),
                components: vec![ComponentName::sub_library("a"), ComponentName::sub_library("b")],
            }
        );
    }

    #[test]
    fn test_missing_sibling_adds_no_edge() {
        let pkg = package(
            "P",
            SpecVersion::new(3, 0),
            vec![Component::executable("server")
                .with_build_depends([LibDependency::new("P").with_libraries(["ghost"])])],
        );

        let order = order_components(&pkg, &ToolConventions::default()).unwrap();
        assert_eq!(order.len(), 1);
    }
}
