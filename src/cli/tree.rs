use crate::config::resolve::CliOverrides;
use crate::errors::Result;
use crate::graph::build_dependency_tree;
use crate::output::OutputFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Root file of the tree
    pub file: PathBuf,

    /// How many levels of local imports to expand below the root
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Project root used for every file in the tree
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

impl TreeArgs {
    fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            format: self.format,
            max_depth: self.max_depth,
        }
    }
}

pub fn run(args: &TreeArgs) -> Result<()> {
    let (config, registry) = super::load(&args.to_cli_overrides())?;

    let report = build_dependency_tree(
        &registry,
        &args.file,
        config.max_depth,
        args.project_root.as_deref(),
    );

    let mut stdout = std::io::stdout();
    match config.format {
        OutputFormat::Json => crate::output::json::write_json(&mut stdout, &report)?,
        OutputFormat::Text => crate::output::text::write_tree_text(&mut stdout, &report)?,
    }
    Ok(())
}
