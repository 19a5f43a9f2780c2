//! Knobs for a configuration run.

use crate::configure::identity::FlagAssignment;
use crate::configure::tools::ToolConventions;
use crate::core::ComponentId;

/// Options shared by every component configured in one run.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    /// Ask the identity service for reproducible ids
    pub deterministic: bool,

    /// Make every component public, not just the main library.
    ///
    /// Used when a component is configured on its own, or when outside
    /// callers must be able to instantiate internal components.
    pub force_public: bool,

    /// Explicit installed-package id handed to the identity service
    pub ipid_override: Option<String>,

    /// Explicit component id handed to the identity service
    pub cid_override: Option<ComponentId>,

    /// Build-time flags, part of every component's identity
    pub flags: FlagAssignment,

    pub tool_conventions: ToolConventions,
}

impl Default for ConfigureOptions {
    fn default() -> Self {
        ConfigureOptions {
            deterministic: true,
            force_public: false,
            ipid_override: None,
            cid_override: None,
            flags: FlagAssignment::new(),
            tool_conventions: ToolConventions::default(),
        }
    }
}
