//! Configured components - the resolver's output.

use std::fmt;

use serde::Serialize;

use crate::core::{AnnotatedId, Component, ComponentId, ComponentName, IncludeRenaming, PackageId};

/// One resolved mix-in edge.
///
/// Implicit includes come from plain dependencies and always carry the no-op
/// renaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentInclude {
    pub target: AnnotatedId,
    pub renaming: IncludeRenaming,
    pub implicit: bool,
}

impl ComponentInclude {
    /// An include declared by a mix-in.
    pub fn explicit(target: AnnotatedId, renaming: IncludeRenaming) -> Self {
        ComponentInclude {
            target,
            renaming,
            implicit: false,
        }
    }

    /// An include inferred from a library dependency.
    pub fn implicit(target: AnnotatedId) -> Self {
        ComponentInclude {
            target,
            renaming: IncludeRenaming::default(),
            implicit: true,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.target.id
    }
}

/// A component whose dependencies have all been tied to component ids.
///
/// This is everything the linker needs; it never re-reads the textual
/// declarations in `component`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfiguredComponent {
    pub identity: AnnotatedId,

    /// The declaration this was configured from
    pub component: Component,

    /// Whether other packages may depend on this component
    pub is_public: bool,

    /// Executables needed at build time, without duplicates
    pub tool_deps: Vec<AnnotatedId>,

    /// Explicit includes first, then implicit ones
    pub includes: Vec<ComponentInclude>,
}

impl ConfiguredComponent {
    pub fn id(&self) -> ComponentId {
        self.identity.id
    }

    pub fn package_id(&self) -> PackageId {
        self.identity.package_id
    }

    pub fn name(&self) -> ComponentName {
        self.identity.name
    }

    pub fn explicit_includes(&self) -> impl Iterator<Item = &ComponentInclude> {
        self.includes.iter().filter(|i| !i.implicit)
    }

    pub fn implicit_includes(&self) -> impl Iterator<Item = &ComponentInclude> {
        self.includes.iter().filter(|i| i.implicit)
    }
}

/// Renders as
///
/// ```text
/// component P-0.1.0-1f3a...
///     include A-1.0.0-x (M as N)
///     include base-4.18.0
/// ```
impl fmt::Display for ConfiguredComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component {}", self.id())?;
        for include in &self.includes {
            write!(f, "\n    include {}", include.id())?;
            if !include.renaming.is_default() {
                write!(f, " {}", include.renaming)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModuleRenaming;
    use semver::Version;

    fn annotated(pkg: &str, name: ComponentName, id: &str) -> AnnotatedId {
        AnnotatedId::new(
            ComponentId::new(id),
            PackageId::new(pkg, Version::new(1, 0, 0)),
            name,
        )
    }

    #[test]
    fn test_display() {
        let component = ConfiguredComponent {
            identity: annotated("P", ComponentName::MAIN_LIBRARY, "P-1.0.0-abc"),
            component: Component::library(),
            is_public: true,
            tool_deps: Vec::new(),
            includes: vec![
                ComponentInclude::explicit(
                    annotated("A", ComponentName::sub_library("x"), "42"),
                    IncludeRenaming::provides(ModuleRenaming::only([("M", "N")])),
                ),
                ComponentInclude::implicit(annotated("base", ComponentName::MAIN_LIBRARY, "base-4")),
            ],
        };

        assert_eq!(
            component.to_string(),
            "component P-1.0.0-abc\n    include 42 (M as N)\n    include base-4"
        );
        assert_eq!(component.explicit_includes().count(), 1);
        assert_eq!(component.implicit_includes().count(), 1);
    }
}
