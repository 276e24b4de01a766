use crate::config::provenance::{ProvenanceMap, Setting, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{DepwalkError, Result};
use crate::output::OutputFormat;
use crate::walk::parent_dir;
use std::path::{Path, PathBuf};

/// Name of the per-project config file, looked up from the working directory upwards.
pub const PROJECT_CONFIG_FILE: &str = ".depwalk.toml";

const ENV_FORMAT: &str = "DEPWALK_FORMAT";
const ENV_MAX_DEPTH: &str = "DEPWALK_MAX_DEPTH";

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub max_depth: Option<usize>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/depwalk/config.toml)
/// 3. Project config (nearest .depwalk.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_config_with(find_user_config().as_deref(), working_dir, cli)
}

/// Same as [`resolve_config`] with an explicit user config location.
pub fn resolve_config_with(
    user_config: Option<&Path>,
    working_dir: &Path,
    cli: &CliOverrides,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::default();

    if let Some(path) = user_config.filter(|p| p.is_file()) {
        let file_config = load_file(path, "user")?;
        apply_file_config(&mut config, &file_config, Source::UserConfig(path.to_path_buf()), &mut prov)?;
        config.loaded_files.push(path.to_path_buf());
    }

    if let Some(path) = find_project_config(working_dir) {
        let file_config = load_file(&path, "project")?;
        apply_file_config(&mut config, &file_config, Source::ProjectConfig(path.clone()), &mut prov)?;
        config.loaded_files.push(path);
    }

    apply_env_vars(&mut config, &mut prov);
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.provenance = prov;
    Ok(config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("depwalk").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }
        dir = parent_dir(dir)?;
    }
}

fn load_file(path: &Path, layer: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        DepwalkError::Config(format!("Could not read {layer} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content)
        .map_err(|e| DepwalkError::Config(format!("Invalid {layer} config {}: {e}", path.display())))
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    if let Some(ref format) = file.defaults.format {
        config.format = format.parse().map_err(DepwalkError::Config)?;
        prov.record(Setting::Format, source.clone());
    }
    if let Some(max_depth) = file.defaults.max_depth {
        config.max_depth = max_depth;
        prov.record(Setting::MaxDepth, source.clone());
    }
    if let Some(ref skip_dirs) = file.java.skip_dirs {
        config.java.skip_dirs = skip_dirs.clone();
        prov.record(Setting::SkipDirs, source.clone());
    }
    if let Some(ref source_roots) = file.java.source_roots {
        config.java.source_roots = source_roots.clone();
        prov.record(Setting::SourceRoots, source);
    }
    Ok(())
}

fn apply_env_vars(config: &mut ResolvedConfig, prov: &mut ProvenanceMap) {
    if let Ok(val) = std::env::var(ENV_FORMAT) {
        match val.parse::<OutputFormat>() {
            Ok(format) => {
                config.format = format;
                prov.record(Setting::Format, Source::EnvVar(ENV_FORMAT));
            }
            Err(e) => tracing::warn!("ignoring {ENV_FORMAT}: {e}"),
        }
    }
    if let Ok(val) = std::env::var(ENV_MAX_DEPTH) {
        match val.trim().parse::<usize>() {
            Ok(n) => {
                config.max_depth = n;
                prov.record(Setting::MaxDepth, Source::EnvVar(ENV_MAX_DEPTH));
            }
            Err(e) => tracing::warn!("ignoring {ENV_MAX_DEPTH}={val}: {e}"),
        }
    }
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(format) = cli.format {
        config.format = format;
        prov.record(Setting::Format, Source::CliFlag("--format"));
    }
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
        prov.record(Setting::MaxDepth, Source::CliFlag("--max-depth"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_DEPTH;
    use std::fs;

    #[test]
    fn defaults_only() {
        let tmp = tempfile::tempdir().unwrap();
        let config = resolve_config_with(None, tmp.path(), &CliOverrides::default()).unwrap();

        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.java.skip_dirs.contains(&"target".to_string()));
        assert!(config.java.source_roots.is_empty());
        assert_eq!(config.provenance.source(Setting::SkipDirs), &Source::Default);
    }

    #[test]
    fn cli_override_takes_precedence() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = CliOverrides {
            format: Some(OutputFormat::Text),
            max_depth: Some(7),
        };
        let config = resolve_config_with(None, tmp.path(), &cli).unwrap();

        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.max_depth, 7);
        assert!(matches!(
            config.provenance.source(Setting::MaxDepth),
            Source::CliFlag(_)
        ));
    }

    #[test]
    fn project_config_found_from_subdirectory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            "[defaults]\nmax_depth = 5\n\n[java]\nsource_roots = [\"gen\"]\n",
        )
        .unwrap();
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let config = resolve_config_with(None, &nested, &CliOverrides::default()).unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.java.source_roots, vec!["gen"]);
        assert_eq!(config.loaded_files, vec![tmp.path().join(PROJECT_CONFIG_FILE)]);
        assert!(matches!(
            config.provenance.source(Setting::SourceRoots),
            Source::ProjectConfig(_)
        ));
    }

    #[test]
    fn project_config_overrides_user_config() {
        let tmp = tempfile::tempdir().unwrap();
        let user = tmp.path().join("user.toml");
        fs::write(&user, "[defaults]\nmax_depth = 9\nformat = \"text\"\n").unwrap();
        let project = tmp.path().join("proj");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join(PROJECT_CONFIG_FILE), "[defaults]\nmax_depth = 1\n").unwrap();

        let config = resolve_config_with(Some(&user), &project, &CliOverrides::default()).unwrap();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.loaded_files.len(), 2);
        assert!(matches!(
            config.provenance.source(Setting::Format),
            Source::UserConfig(_)
        ));
    }

    #[test]
    fn invalid_project_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(PROJECT_CONFIG_FILE), "[defaults]\nformat = \"yaml\"\n").unwrap();
        let err = resolve_config_with(None, tmp.path(), &CliOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("yaml"));

        fs::write(tmp.path().join(PROJECT_CONFIG_FILE), "not = [valid").unwrap();
        let err = resolve_config_with(None, tmp.path(), &CliOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid project config"));
    }
}
