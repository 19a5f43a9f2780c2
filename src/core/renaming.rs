//! Module renamings attached to mix-ins.
//!
//! These are carried through configuration untouched; interpreting them is
//! the linker's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::InternedString;

/// A module name, e.g. `Data.Map`.
pub type ModuleName = InternedString;

/// How the modules of a dependency become visible to a dependent.
///
/// `renames` pairs are `(name in the dependency, name seen by the dependent)`.
/// With `include_unrenamed`, every module not mentioned in `renames` stays
/// visible under its own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ModuleRenaming {
    pub renames: Vec<(ModuleName, ModuleName)>,
    pub include_unrenamed: bool,
}

impl Default for ModuleRenaming {
    fn default() -> Self {
        ModuleRenaming {
            renames: Vec::new(),
            include_unrenamed: true,
        }
    }
}

impl ModuleRenaming {
    /// Expose only the listed modules, under their new names.
    pub fn only(renames: impl IntoIterator<Item = (impl Into<ModuleName>, impl Into<ModuleName>)>) -> Self {
        ModuleRenaming {
            renames: renames
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
            include_unrenamed: false,
        }
    }

    /// True for the no-op renaming.
    pub fn is_default(&self) -> bool {
        self.renames.is_empty() && self.include_unrenamed
    }
}

impl fmt::Display for ModuleRenaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            return Ok(());
        }
        if self.include_unrenamed {
            write!(f, "with ")?;
        }
        write!(f, "(")?;
        for (i, (from, to)) in self.renames.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if from == to {
                write!(f, "{}", from)?;
            } else {
                write!(f, "{} as {}", from, to)?;
            }
        }
        write!(f, ")")
    }
}

/// The renamings of one mix-in: what it provides and how its holes are filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct IncludeRenaming {
    pub provides: ModuleRenaming,
    pub requires: ModuleRenaming,
}

impl IncludeRenaming {
    pub fn provides(provides: ModuleRenaming) -> Self {
        IncludeRenaming {
            provides,
            requires: ModuleRenaming::default(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.provides.is_default() && self.requires.is_default()
    }
}

impl fmt::Display for IncludeRenaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.provides)?;
        if !self.requires.is_default() {
            if !self.provides.is_default() {
                write!(f, " ")?;
            }
            write!(f, "requires {}", self.requires)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_noop() {
        let renaming = IncludeRenaming::default();
        assert!(renaming.is_default());
        assert_eq!(renaming.to_string(), "");
    }

    #[test]
    fn test_display() {
        let only = ModuleRenaming::only([("M", "N"), ("Data.Map", "Data.Map")]);
        assert_eq!(only.to_string(), "(M as N, Data.Map)");
        assert!(!only.is_default());

        let with = ModuleRenaming {
            include_unrenamed: true,
            ..ModuleRenaming::only([("Str", "Str.Text")])
        };
        assert_eq!(with.to_string(), "with (Str as Str.Text)");

        let include = IncludeRenaming {
            provides: ModuleRenaming::default(),
            requires: ModuleRenaming::only([("Sig", "Impl")]),
        };
        assert_eq!(include.to_string(), "requires (Sig as Impl)");
    }

    #[test]
    fn test_deserialize_defaults() {
        let renaming: IncludeRenaming =
            toml::from_str("provides = { renames = [[\"M\", \"N\"]], include-unrenamed = false }")
                .unwrap();

        assert_eq!(renaming.provides, ModuleRenaming::only([("M", "N")]));
        assert!(renaming.requires.is_default());
    }
}
