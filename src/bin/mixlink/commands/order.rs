//! `mixlink order` command

use anyhow::{bail, Result};

use crate::cli::OrderArgs;
use crate::commands::{locate_manifest, project_root};
use mixlink::configure::order_components;
use mixlink::core::PackageDescription;
use mixlink::util::config::{global_config_path, load_config, project_config_path};
use mixlink::util::diagnostic::emit;

pub fn execute(args: OrderArgs, color: bool) -> Result<()> {
    let manifest_path = locate_manifest(args.manifest.as_deref())?;
    let package = PackageDescription::load(&manifest_path)?;

    let config = load_config(
        global_config_path().as_deref(),
        &project_config_path(project_root(&manifest_path)),
    );

    match order_components(&package, &config.tool_conventions()) {
        Ok(components) => {
            for (index, component) in components.iter().enumerate() {
                println!("{:>3}. {}", index + 1, component.name);
            }
            Ok(())
        }
        Err(e) => {
            emit(&e.to_diagnostic(), color);
            bail!("could not order components of `{}`", package.name());
        }
    }
}
