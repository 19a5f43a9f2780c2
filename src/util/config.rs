//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.mixlink/config.toml` - user-wide defaults
//! - Project: `.mixlink/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::configure::{ConfigureOptions, FlagAssignment, ToolConventions};
use crate::util::InternedString;

/// Mixlink configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Component configuration settings
    pub configure: ConfigureConfig,

    /// Build-time flag assignment folded into component identities
    pub flags: BTreeMap<String, bool>,
}

/// The `[configure]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConfigureConfig {
    /// Produce reproducible component ids (default: true)
    pub deterministic: Option<bool>,

    /// Mark every component public so external callers can instantiate it
    pub force_public: Option<bool>,

    /// Legacy `build-tools` names that map to a same-named package and executable
    pub known_tools: Option<Vec<String>>,

    /// Packages whose plain dependency also implies a same-named executable
    pub tool_providing_packages: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let ours = &mut self.configure;
        let theirs = other.configure;

        if theirs.deterministic.is_some() {
            ours.deterministic = theirs.deterministic;
        }
        if theirs.force_public.is_some() {
            ours.force_public = theirs.force_public;
        }
        if theirs.known_tools.is_some() {
            ours.known_tools = theirs.known_tools;
        }
        if theirs.tool_providing_packages.is_some() {
            ours.tool_providing_packages = theirs.tool_providing_packages;
        }

        // Flags merge per name.
        self.flags.extend(other.flags);
    }

    /// Flag assignment with interned names.
    pub fn flag_assignment(&self) -> FlagAssignment {
        self.flags
            .iter()
            .map(|(name, value)| (InternedString::new(name), *value))
            .collect()
    }

    /// Build-tool conventions, falling back to the defaults for unset lists.
    pub fn tool_conventions(&self) -> ToolConventions {
        let mut conventions = ToolConventions::default();
        if let Some(ref tools) = self.configure.known_tools {
            conventions.known_tools = tools.iter().map(InternedString::new).collect();
        }
        if let Some(ref packages) = self.configure.tool_providing_packages {
            conventions.tool_providing_packages =
                packages.iter().map(InternedString::new).collect();
        }
        conventions
    }

    /// Resolver options described by this configuration.
    pub fn configure_options(&self) -> ConfigureOptions {
        ConfigureOptions {
            deterministic: self.configure.deterministic.unwrap_or(true),
            force_public: self.configure.force_public.unwrap_or(false),
            flags: self.flag_assignment(),
            tool_conventions: self.tool_conventions(),
            ..ConfigureOptions::default()
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.mixlink/config.toml)
/// 2. Global config (~/.mixlink/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.mixlink).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".mixlink"))
}

/// Get the global config path (~/.mixlink/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.mixlink/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".mixlink").join("config.toml")
}
