//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Mixlink - resolve component dependencies and mix-ins to component ids
#[derive(Parser)]
#[command(name = "mixlink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure every buildable component of one or more packages
    Configure(ConfigureArgs),

    /// Show the order a package's components are configured in
    Order(OrderArgs),
}

/// Output format for configured components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Package description(s) to configure (defaults to the nearest Mixlink.toml)
    #[arg(long)]
    pub manifest: Vec<PathBuf>,

    /// External dependency map of already-configured components
    #[arg(long)]
    pub deps: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Produce reproducible component ids
    #[arg(long, overrides_with = "no_deterministic")]
    pub deterministic: bool,

    /// Produce fresh component ids on every run
    #[arg(long, overrides_with = "deterministic")]
    pub no_deterministic: bool,

    /// Mark every component public, not just the main library
    #[arg(long)]
    pub force_public: bool,

    /// Installed-package id to base component ids on
    #[arg(long)]
    pub ipid: Option<String>,

    /// Component id to use verbatim
    #[arg(long)]
    pub cid: Option<String>,

    /// Build flag, as `name`, `-name` or `name=true|false` (repeatable)
    #[arg(long = "flag", value_parser = parse_flag, allow_hyphen_values = true)]
    pub flags: Vec<(String, bool)>,
}

impl ConfigureArgs {
    /// The deterministic setting requested on the command line, if any.
    pub fn deterministic(&self) -> Option<bool> {
        if self.deterministic {
            Some(true)
        } else if self.no_deterministic {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Args)]
pub struct OrderArgs {
    /// Package description (defaults to the nearest Mixlink.toml)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Parse a `--flag` value.
pub fn parse_flag(s: &str) -> Result<(String, bool), String> {
    let (name, value) = match s.split_once('=') {
        Some((name, value)) => {
            let value = value
                .parse::<bool>()
                .map_err(|_| format!("invalid flag value `{}`, expected true or false", value))?;
            (name, value)
        }
        None => match s.strip_prefix('-') {
            Some(name) => (name, false),
            None => (s.strip_prefix('+').unwrap_or(s), true),
        },
    };

    if name.is_empty() {
        return Err("flag name cannot be empty".to_string());
    }
    Ok((name.to_string(), value))
}
