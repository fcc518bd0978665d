//! Error types
//!
//! Faults that abort a run. Structural defects in a document are not errors,
//! they are [`Diagnostic`](crate::balance::Diagnostic)s.

use std::path::PathBuf;

/// A fault that stops a run before any document is scanned.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write report: {0}")]
    Report(#[source] std::io::Error),
}

/// Invalid or unusable vocabulary / project configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("vocabulary '{0}' has no tags")]
    EmptyVocabulary(String),

    #[error("vocabulary '{vocabulary}' contains invalid tag name '{tag}'")]
    InvalidTagName { vocabulary: String, tag: String },

    #[error("unknown vocabulary '{name}' (known: {known})")]
    UnknownVocabulary { name: String, known: String },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("recovery depth must be at least 1")]
    ZeroRecoveryDepth,

    #[error("cannot build tag matcher: {0}")]
    Matcher(#[from] regex::Error),
}

pub type Result<T, E = CheckError> = std::result::Result<T, E>;
