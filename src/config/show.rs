use crate::config::provenance::Setting;
use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    writeln!(w, "Resolved settings:")?;
    for (setting, source) in config.provenance.iter() {
        writeln!(w, "  {}: {} <- {}", setting.key(), value_of(config, setting), source)?;
    }

    let overridden: Vec<&str> = config.provenance.overridden().map(Setting::key).collect();
    if !overridden.is_empty() {
        writeln!(w)?;
        writeln!(w, "Overridden: {}", overridden.join(", "))?;
    }

    Ok(())
}

fn value_of(config: &ResolvedConfig, setting: Setting) -> String {
    match setting {
        Setting::Format => config.format.to_string(),
        Setting::MaxDepth => config.max_depth.to_string(),
        Setting::SkipDirs => list(&config.java.skip_dirs),
        Setting::SourceRoots => list(&config.java.source_roots),
    }
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        format!("[{}]", items.join(", "))
    }
}
