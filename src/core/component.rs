//! Component definitions - the buildable units of a package.
//!
//! A Component is the declarative fragment a package description provides for
//! one library, executable, test suite, benchmark or foreign library.

use serde::{Deserialize, Serialize};

use crate::core::dependency::{ExeDependency, LibDependency, Mixin};
use crate::core::{ComponentName, LibraryName};
use crate::util::InternedString;

/// Dependency-related fields shared by every component kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildInfo {
    /// Whether the component can be built at all
    #[serde(default = "default_true")]
    pub buildable: bool,

    /// Library dependencies
    #[serde(default)]
    pub build_depends: Vec<LibDependency>,

    /// Executables needed at build time
    #[serde(default)]
    pub build_tool_depends: Vec<ExeDependency>,

    /// Legacy build tools, named by executable only
    #[serde(default)]
    pub build_tools: Vec<InternedString>,

    /// Explicit mix-ins
    #[serde(default)]
    pub mixins: Vec<Mixin>,
}

fn default_true() -> bool {
    true
}

impl Default for BuildInfo {
    fn default() -> Self {
        BuildInfo {
            buildable: true,
            build_depends: Vec::new(),
            build_tool_depends: Vec::new(),
            build_tools: Vec::new(),
            mixins: Vec::new(),
        }
    }
}

/// One component of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: ComponentName,

    #[serde(flatten)]
    pub build_info: BuildInfo,
}

impl Component {
    pub fn new(name: ComponentName) -> Self {
        Component {
            name,
            build_info: BuildInfo::default(),
        }
    }

    /// The package's main library.
    pub fn library() -> Self {
        Self::new(ComponentName::MAIN_LIBRARY)
    }

    pub fn sub_library(name: impl Into<InternedString>) -> Self {
        Self::new(ComponentName::Lib(LibraryName::Sub(name.into())))
    }

    pub fn executable(name: impl Into<InternedString>) -> Self {
        Self::new(ComponentName::Exe(name.into()))
    }

    pub fn test_suite(name: impl Into<InternedString>) -> Self {
        Self::new(ComponentName::Test(name.into()))
    }

    pub fn benchmark(name: impl Into<InternedString>) -> Self {
        Self::new(ComponentName::Bench(name.into()))
    }

    pub fn foreign_library(name: impl Into<InternedString>) -> Self {
        Self::new(ComponentName::FLib(name.into()))
    }

    pub fn with_build_depends(mut self, deps: impl IntoIterator<Item = LibDependency>) -> Self {
        self.build_info.build_depends.extend(deps);
        self
    }

    pub fn with_build_tool_depends(
        mut self,
        deps: impl IntoIterator<Item = ExeDependency>,
    ) -> Self {
        self.build_info.build_tool_depends.extend(deps);
        self
    }

    pub fn with_build_tools(
        mut self,
        tools: impl IntoIterator<Item = impl Into<InternedString>>,
    ) -> Self {
        self.build_info
            .build_tools
            .extend(tools.into_iter().map(Into::into));
        self
    }

    pub fn with_mixins(mut self, mixins: impl IntoIterator<Item = Mixin>) -> Self {
        self.build_info.mixins.extend(mixins);
        self
    }

    /// Mark the component as not buildable.
    pub fn unbuildable(mut self) -> Self {
        self.build_info.buildable = false;
        self
    }

    pub fn is_buildable(&self) -> bool {
        self.build_info.buildable
    }
}
