use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A configurable setting, named by its dotted TOML key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Setting {
    Format,
    MaxDepth,
    SkipDirs,
    SourceRoots,
}

impl Setting {
    pub const ALL: [Setting; 4] = [
        Setting::Format,
        Setting::MaxDepth,
        Setting::SkipDirs,
        Setting::SourceRoots,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Setting::Format => "defaults.format",
            Setting::MaxDepth => "defaults.max_depth",
            Setting::SkipDirs => "java.skip_dirs",
            Setting::SourceRoots => "java.source_roots",
        }
    }
}

/// The config layer a setting was last written by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Source {
    #[default]
    Default,
    UserConfig(PathBuf),
    ProjectConfig(PathBuf),
    EnvVar(&'static str),
    CliFlag(&'static str),
}

impl Source {
    pub fn is_default(&self) -> bool {
        matches!(self, Source::Default)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (layer, origin) = match self {
            Source::Default => return f.write_str("default"),
            Source::UserConfig(path) => ("user config", path.display().to_string()),
            Source::ProjectConfig(path) => ("project config", path.display().to_string()),
            Source::EnvVar(name) => ("env var", name.to_string()),
            Source::CliFlag(flag) => ("CLI flag", flag.to_string()),
        };
        write!(f, "{layer} ({origin})")
    }
}

static DEFAULT_SOURCE: Source = Source::Default;

/// Per-setting record of which layer won. Every setting starts at
/// [`Source::Default`].
#[derive(Debug, Clone)]
pub struct ProvenanceMap {
    sources: BTreeMap<Setting, Source>,
}

impl Default for ProvenanceMap {
    fn default() -> Self {
        Self {
            sources: Setting::ALL.iter().map(|&s| (s, Source::Default)).collect(),
        }
    }
}

impl ProvenanceMap {
    pub fn record(&mut self, setting: Setting, source: Source) {
        self.sources.insert(setting, source);
    }

    pub fn source(&self, setting: Setting) -> &Source {
        self.sources.get(&setting).unwrap_or(&DEFAULT_SOURCE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Setting, &Source)> + '_ {
        self.sources.iter().map(|(&s, src)| (s, src))
    }

    /// Settings some layer above the built-in defaults has written.
    pub fn overridden(&self) -> impl Iterator<Item = Setting> + '_ {
        self.iter()
            .filter(|(_, src)| !src.is_default())
            .map(|(s, _)| s)
    }
}
