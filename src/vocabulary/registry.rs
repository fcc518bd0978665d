//! Vocabulary Registry
//!
//! In-memory registry of named vocabularies. Built-in vocabularies are
//! embedded in the binary; vocabulary files found on disk override them by
//! name according to their priority.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::schema::{Vocabulary, VocabularyFile};
use crate::error::ConfigError;

/// Name of the vocabulary used when nothing else is configured
pub const DEFAULT_VOCABULARY: &str = "react-html";

const BUILT_IN: &[(&str, &str)] = &[
    ("html", include_str!("../../resources/vocabularies/html.toml")),
    (
        "react-html",
        include_str!("../../resources/vocabularies/react-html.toml"),
    ),
];

/// Loading priority of a vocabulary source; higher wins on name clashes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VocabularyPriority {
    BuiltIn = 0,
    UserGlobal = 1,
    Workspace = 2,
    Explicit = 3,
}

/// A vocabulary together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedVocabulary {
    pub vocabulary: Vocabulary,
    pub priority: VocabularyPriority,
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct VocabularyRegistry {
    vocabularies: HashMap<String, LoadedVocabulary>,
}

impl VocabularyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the embedded vocabularies
    pub fn with_built_ins() -> Self {
        let mut registry = Self::new();
        registry.add_built_in_vocabularies();
        registry
    }

    pub fn add_built_in_vocabularies(&mut self) {
        for (name, content) in BUILT_IN {
            match parse_vocabulary(content, None) {
                Ok(vocabulary) => {
                    self.add(LoadedVocabulary {
                        vocabulary,
                        priority: VocabularyPriority::BuiltIn,
                        source_path: None,
                    });
                }
                Err(e) => log::warn!("Failed to load built-in vocabulary '{}': {}", name, e),
            }
        }
    }

    /// Insert a vocabulary unless one of higher priority already holds its name.
    /// Returns whether it was inserted.
    pub fn add(&mut self, loaded: LoadedVocabulary) -> bool {
        let should_load = match self.vocabularies.get(loaded.vocabulary.name()) {
            Some(existing) => loaded.priority >= existing.priority,
            None => true,
        };

        if should_load {
            log::debug!(
                "Registered vocabulary '{}' ({} tags, {:?})",
                loaded.vocabulary.name(),
                loaded.vocabulary.len(),
                loaded.priority
            );
            self.vocabularies
                .insert(loaded.vocabulary.name().to_string(), loaded);
        }

        should_load
    }

    /// Load every `*.toml` file of a directory. A missing directory is not an
    /// error; a file that fails to load is logged and skipped.
    pub fn load_directory(&mut self, dir: &Path, priority: VocabularyPriority) -> usize {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("toml"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match load_vocabulary_file(&path) {
                Ok(vocabulary) => {
                    if self.add(LoadedVocabulary {
                        vocabulary,
                        priority,
                        source_path: Some(path),
                    }) {
                        loaded += 1;
                    }
                }
                Err(e) => log::warn!("Skipping vocabulary file: {}", e),
            }
        }

        loaded
    }

    pub fn get(&self, name: &str) -> Option<&LoadedVocabulary> {
        self.vocabularies.get(name)
    }

    /// Look up a vocabulary by name, failing with the list of known names.
    pub fn resolve(&self, name: &str) -> Result<&Vocabulary, ConfigError> {
        self.get(name)
            .map(|loaded| &loaded.vocabulary)
            .ok_or_else(|| ConfigError::UnknownVocabulary {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }

    /// Sorted vocabulary names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.vocabularies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Standard vocabulary directories with their priorities:
/// `<config_dir>/tagcheck/vocabularies` then `./.tagcheck/vocabularies`.
pub fn default_vocabulary_dirs() -> Vec<(PathBuf, VocabularyPriority)> {
    let mut dirs = Vec::new();

    if let Some(config_dir) = dirs::config_dir() {
        dirs.push((
            config_dir.join("tagcheck").join("vocabularies"),
            VocabularyPriority::UserGlobal,
        ));
    }

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push((
            cwd.join(".tagcheck").join("vocabularies"),
            VocabularyPriority::Workspace,
        ));
    }

    dirs
}

/// Read and validate a single vocabulary file
pub fn load_vocabulary_file(path: &Path) -> Result<Vocabulary, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_vocabulary(&content, Some(path))
}

fn parse_vocabulary(content: &str, source_path: Option<&Path>) -> Result<Vocabulary, ConfigError> {
    let file: VocabularyFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: source_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("<built-in>")),
        source,
    })?;
    Vocabulary::try_from(file)
}
