//! Configuration error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::{ComponentName, LibraryName, Mixin, PackageName};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// A declaration of one component that could not be resolved.
///
/// Fatal for that component and for every component after it; there is no
/// partial result.
#[derive(Debug, Clone, Error, MietteDiagnostic, PartialEq, Eq)]
pub enum ConfigureError {
    #[error("dependency on unbuildable package `{package}`")]
    #[diagnostic(
        code(mixlink::configure::unbuildable_package),
        help("the package is missing from the dependency map or is not buildable")
    )]
    UnresolvedLibraryDependency {
        component: ComponentName,
        package: PackageName,
    },

    #[error("dependency on unbuildable {} from `{package}`", .library.describe())]
    #[diagnostic(
        code(mixlink::configure::unbuildable_library),
        help("the package does not provide this library, or it is not buildable")
    )]
    UnresolvedSublibrary {
        component: ComponentName,
        package: PackageName,
        library: LibraryName,
    },

    #[error("mix-in refers to non-existent library `{mixin}`")]
    #[diagnostic(
        code(mixlink::configure::unknown_mixin),
        help("did you forget to add the package to build-depends?")
    )]
    UnresolvedMixin {
        component: ComponentName,
        mixin: Mixin,
    },
}

impl ConfigureError {
    /// The component whose declaration failed.
    pub fn component(&self) -> ComponentName {
        match self {
            ConfigureError::UnresolvedLibraryDependency { component, .. }
            | ConfigureError::UnresolvedSublibrary { component, .. }
            | ConfigureError::UnresolvedMixin { component, .. } => *component,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).with_context(format!(
            "while configuring component `{}`",
            self.component()
        ));

        match self {
            ConfigureError::UnresolvedLibraryDependency { package, .. } => diag
                .with_context(format!("`{}` is listed in build-depends", package))
                .with_suggestion(suggestions::UNBUILDABLE_PACKAGE),

            ConfigureError::UnresolvedSublibrary { package, library, .. } => diag
                .with_context(format!(
                    "`{}` is configured but has no buildable {}",
                    package,
                    library.describe()
                ))
                .with_suggestion(suggestions::UNBUILDABLE_LIBRARY),

            ConfigureError::UnresolvedMixin { mixin, .. } => diag
                .with_context(format!(
                    "`{}` is not among the component's library dependencies",
                    mixin
                ))
                .with_suggestion(suggestions::MIXIN_NOT_A_DEPENDENCY)
                .with_suggestion("Check the spelling of the mix-in's package and library"),
        }
    }
}

/// Error ordering the components of a package.
#[derive(Debug, Clone, Error, MietteDiagnostic, PartialEq, Eq)]
pub enum OrderError {
    #[error("components of `{package}` depend on each other in a cycle")]
    #[diagnostic(code(mixlink::configure::component_cycle))]
    Cycle {
        package: PackageName,
        components: Vec<ComponentName>,
    },
}

impl OrderError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            OrderError::Cycle { components, .. } => {
                let cycle: Vec<String> = components.iter().map(|c| c.to_string()).collect();
                Diagnostic::error(self.to_string())
                    .with_context(format!("cycle: {}", cycle.join(" -> ")))
                    .with_suggestion(suggestions::COMPONENT_CYCLE)
            }
        }
    }
}
