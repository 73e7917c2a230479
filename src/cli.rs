//! Command line interface of the `dbdv` binary

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::version::{GameVersion, ModelRegistry, VersionCatalog, VersionError, VersionRange};

#[derive(Parser)]
#[command(name = "dbdv")]
#[command(version, about = "Game version ordering and range algebra for DBDIE")]
pub struct Cli {
    /// Write logs to stderr instead of the log file
    #[arg(long, global = true)]
    pub log_stderr: bool,

    /// Config file (defaults to the data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the components of a version
    Parse {
        #[arg(value_name = "VERSION")]
        input: GameVersion,
    },
    /// Compare two versions
    Compare { a: GameVersion, b: GameVersion },
    /// Check whether a range (MIN..MAX or MIN..) contains a version
    Contains {
        #[arg(value_parser = parse_range)]
        range: VersionRange,
        #[arg(value_name = "VERSION")]
        input: GameVersion,
    },
    /// Intersect two ranges (MIN..MAX or MIN..)
    Intersect {
        #[arg(value_parser = parse_range)]
        a: VersionRange,
        #[arg(value_parser = parse_range)]
        b: VersionRange,
    },
    /// List the models that apply to a catalog version
    Select {
        #[arg(value_name = "VERSION")]
        name: String,
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        models: Option<PathBuf>,
    },
}

/// Parse `MIN..MAX` or `MIN..` into a range
pub fn parse_range(s: &str) -> Result<VersionRange, VersionError> {
    let (min, max) = s.split_once("..").unwrap_or((s, ""));
    let max = Some(max).filter(|max| !max.is_empty());
    VersionRange::from_strings(min, max)
}

/// Run a command and return the text to print
pub fn run(command: Command, config: &AppConfig) -> anyhow::Result<String> {
    match command {
        Command::Parse { input } => Ok(format!(
            "major: {}\nminor: {}\npatch: {}\nptb: {}",
            input.major,
            input.minor,
            input.patch,
            input.is_ptb()
        )),
        Command::Compare { a, b } => {
            let symbol = match a.cmp(&b) {
                std::cmp::Ordering::Less => "<",
                std::cmp::Ordering::Equal => "=",
                std::cmp::Ordering::Greater => ">",
            };
            Ok(format!("{a} {symbol} {b}"))
        }
        Command::Contains { range, input } => Ok(range.contains(&input).to_string()),
        Command::Intersect { a, b } => Ok(match &a & &b {
            Some(range) => range.to_string(),
            None => "(disjoint)".to_string(),
        }),
        Command::Select {
            name,
            catalog,
            models,
        } => {
            let catalog_path = catalog.unwrap_or_else(|| config.catalog_path());
            let models_path = models.unwrap_or_else(|| config.models_path());
            let catalog = VersionCatalog::load(&catalog_path)
                .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
            let registry = ModelRegistry::load(&models_path)
                .with_context(|| format!("loading models {}", models_path.display()))?;

            let selected = registry.applicable(&catalog, &name)?;
            info!("Selected {} models for {}", selected.len(), name);
            Ok(selected
                .iter()
                .map(|model| model.name.as_str())
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
