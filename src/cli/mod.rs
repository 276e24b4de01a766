pub mod analyze;
pub mod config;
pub mod languages;
pub mod tree;

use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::errors::{DepwalkError, Result};
use crate::parse::{ParserRegistry, ParserSettings};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "depwalk",
    version,
    about = "Import analysis and dependency trees for Python and Java files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze the imports of a single file
    Analyze(analyze::AnalyzeArgs),
    /// Build the dependency tree rooted at a file
    Tree(tree::TreeArgs),
    /// Inspect resolved configuration
    Config(config::ConfigArgs),
    /// List supported languages and their file extensions
    Languages,
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => analyze::run(&args),
        Commands::Tree(args) => tree::run(&args),
        Commands::Config(args) => config::run(&args),
        Commands::Languages => languages::run(),
    }
}

/// Resolve configuration from the current directory and build the parser
/// registry it describes.
fn load(overrides: &CliOverrides) -> Result<(ResolvedConfig, ParserRegistry)> {
    let cwd = std::env::current_dir().map_err(DepwalkError::Io)?;
    let config = resolve_config(&cwd, overrides)?;
    let settings = ParserSettings::from_config(&config)?;
    Ok((config, ParserRegistry::with_defaults(&settings)))
}
