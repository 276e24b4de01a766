use crate::config::ResolvedConfig;
use crate::errors::Result;
use crate::parse::java::{JavaParser, JavaSettings};
use crate::parse::python::PythonParser;
use crate::parse::LanguageParser;
use crate::walk::dotted_extension;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builds a parser instance, optionally bound to a project root.
pub type ParserCtor = Arc<dyn Fn(Option<PathBuf>) -> Box<dyn LanguageParser> + Send + Sync>;

/// Per-language settings passed to the built-in parsers.
#[derive(Debug, Clone, Default)]
pub struct ParserSettings {
    pub java: JavaSettings,
}

impl ParserSettings {
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        Ok(Self {
            java: JavaSettings::new(&config.java.skip_dirs, &config.java.source_roots)?,
        })
    }
}

/// Maps file extensions to parser constructors.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: BTreeMap<String, ParserCtor>,
}

impl ParserRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in Python and Java parsers.
    pub fn with_defaults(settings: &ParserSettings) -> Self {
        let mut registry = Self::new();
        registry.register(|root| Box::new(PythonParser::new(root)));
        let java = Arc::new(settings.java.clone());
        registry.register(move |root| Box::new(JavaParser::with_settings(root, Arc::clone(&java))));
        registry
    }

    /// Map every extension the parser claims to `ctor`.
    /// An extension that is already mapped is taken over by the new parser.
    pub fn register<F>(&mut self, ctor: F)
    where
        F: Fn(Option<PathBuf>) -> Box<dyn LanguageParser> + Send + Sync + 'static,
    {
        let ctor: ParserCtor = Arc::new(ctor);
        let unbound = ctor(None);
        for ext in unbound.file_extensions() {
            let ext = ext.to_lowercase();
            if self.parsers.insert(ext.clone(), Arc::clone(&ctor)).is_some() {
                tracing::debug!("{ext} now handled by the {} parser", unbound.language());
            }
        }
    }

    /// A fresh parser for `path`'s extension (case-insensitive), bound to
    /// `project_root` when one is given.
    pub fn lookup(
        &self,
        path: &Path,
        project_root: Option<&Path>,
    ) -> Option<Box<dyn LanguageParser>> {
        let ext = dotted_extension(path);
        self.parsers
            .get(&ext)
            .map(|ctor| ctor(project_root.map(Path::to_path_buf)))
    }

    /// Whether some registered parser claims `path`'s extension.
    pub fn supports(&self, path: &Path) -> bool {
        self.parsers.contains_key(&dotted_extension(path))
    }

    /// Registered extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<String> {
        self.parsers.keys().cloned().collect()
    }

    /// Language tag → extensions currently routed to it.
    pub fn languages(&self) -> BTreeMap<String, Vec<String>> {
        let mut langs: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (ext, ctor) in &self.parsers {
            langs
                .entry(ctor(None).language().to_string())
                .or_default()
                .push(ext.clone());
        }
        langs
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}
