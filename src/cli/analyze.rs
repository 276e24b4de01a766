use crate::analysis::analyze_imports;
use crate::config::resolve::CliOverrides;
use crate::errors::Result;
use crate::output::OutputFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// File to analyze
    pub file: PathBuf,

    /// Project root used for resolution (discovered from the file when omitted)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let overrides = CliOverrides {
        format: args.format,
        ..Default::default()
    };
    let (config, registry) = super::load(&overrides)?;

    let result = analyze_imports(&registry, &args.file, args.project_root.as_deref());
    if !result.is_success() {
        tracing::info!("analysis of {} failed", args.file.display());
    }

    let mut stdout = std::io::stdout();
    match config.format {
        OutputFormat::Json => crate::output::json::write_json(&mut stdout, &result)?,
        OutputFormat::Text => crate::output::text::write_analysis_text(&mut stdout, &result)?,
    }
    Ok(())
}
