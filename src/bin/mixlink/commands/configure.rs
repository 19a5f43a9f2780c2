//! `mixlink configure` command

use anyhow::{bail, Result};

use crate::cli::{ConfigureArgs, OutputFormat};
use crate::commands::{locate_manifest, project_root};
use mixlink::configure::{ConfigureOptions, ConfiguredComponentMap, HashedIdentity};
use mixlink::core::{ComponentId, PackageDescription};
use mixlink::ops::{configure_packages, load_external_map, ConfigureReport};
use mixlink::util::config::{global_config_path, load_config, project_config_path};
use mixlink::util::diagnostic::emit;
use mixlink::util::{Diagnostic, InternedString};

pub fn execute(args: ConfigureArgs, color: bool) -> Result<()> {
    let manifest_paths = if args.manifest.is_empty() {
        vec![locate_manifest(None)?]
    } else {
        args.manifest.clone()
    };

    let packages = manifest_paths
        .iter()
        .map(|path| PackageDescription::load(path))
        .collect::<Result<Vec<_>>>()?;

    let external = match args.deps {
        Some(ref path) => load_external_map(path)?,
        None => ConfiguredComponentMap::new(),
    };

    // Project settings come from the first package's directory.
    let config = load_config(
        global_config_path().as_deref(),
        &project_config_path(project_root(&manifest_paths[0])),
    );
    let options = apply_overrides(config.configure_options(), &args);

    let identity = HashedIdentity::new();
    let results = configure_packages(&packages, &external, &identity, &options);

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = Vec::new();
    for ((package, path), result) in packages.iter().zip(&manifest_paths).zip(results) {
        match result {
            Ok(report) => {
                if options.cid_override.is_some() && report.components.len() > 1 {
                    emit(
                        &Diagnostic::warning(format!(
                            "--cid gives all {} components of `{}` the same id",
                            report.components.len(),
                            package.name()
                        ))
                        .with_location(path),
                        color,
                    );
                }
                reports.push(report);
            }
            Err(e) => {
                emit(&e.to_diagnostic().with_location(path), color);
                failed.push(package.name());
            }
        }
    }

    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|name| name.as_str()).collect();
        bail!("could not configure {}", names.join(", "));
    }

    print_reports(&reports, args.format)
}

/// Command-line settings take precedence over configuration files.
fn apply_overrides(mut options: ConfigureOptions, args: &ConfigureArgs) -> ConfigureOptions {
    if let Some(deterministic) = args.deterministic() {
        options.deterministic = deterministic;
    }
    if args.force_public {
        options.force_public = true;
    }
    if let Some(ref ipid) = args.ipid {
        options.ipid_override = Some(ipid.clone());
    }
    if let Some(ref cid) = args.cid {
        options.cid_override = Some(ComponentId::new(cid));
    }
    for (name, value) in &args.flags {
        options.flags.insert(InternedString::new(name), *value);
    }
    options
}

fn print_reports(reports: &[ConfigureReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                println!("{}", report.render_text());
            }
        }
        OutputFormat::Json => {
            let json = match reports {
                [report] => serde_json::to_string_pretty(report)?,
                _ => serde_json::to_string_pretty(reports)?,
            };
            println!("{}", json);
        }
    }
    Ok(())
}
