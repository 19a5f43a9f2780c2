//! Command implementations

pub mod configure;
pub mod order;

use std::path::{Path, PathBuf};

use anyhow::Result;

use mixlink::core::find_manifest;
use mixlink::util::diagnostic::suggestions;

/// The given manifest path, or the nearest Mixlink.toml above the current
/// directory.
pub fn locate_manifest(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir()?;
    find_manifest(&cwd).ok_or_else(|| {
        anyhow::anyhow!(
            "could not find Mixlink.toml in {} or any parent directory\n{}",
            cwd.display(),
            suggestions::NO_MANIFEST
        )
    })
}

/// Directory holding the project's `.mixlink/` settings.
pub fn project_root(manifest_path: &Path) -> &Path {
    manifest_path.parent().unwrap_or_else(|| Path::new("."))
}
