//! Configuration management for tagcheck.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project configuration (`.tagcheck.toml`)
//! - Vocabulary selection and vocabulary directories

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::balance::{BalanceChecker, Lookahead};
use crate::error::ConfigError;
use crate::report::OutputFormat;
use crate::vocabulary::{
    default_vocabulary_dirs, load_vocabulary_file, Vocabulary, VocabularyPriority,
    VocabularyRegistry, DEFAULT_VOCABULARY,
};

/// File name looked up in the working directory when `--config` is not given
pub const PROJECT_CONFIG_FILE: &str = ".tagcheck.toml";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "tagcheck")]
#[command(about = "Report unbalanced tags in markup and JSX documents")]
#[command(version)]
pub struct Args {
    /// Documents to check
    #[arg(required_unless_present = "list_vocabularies")]
    pub files: Vec<PathBuf>,

    #[arg(long, help = "Named vocabulary to use (e.g., 'html', 'react-html')")]
    pub vocabulary: Option<String>,

    #[arg(long, help = "Vocabulary TOML file to use")]
    pub vocabulary_file: Option<PathBuf>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated tag names forming the vocabulary"
    )]
    pub tags: Option<Vec<String>>,

    #[arg(long, help = "Directory containing vocabulary TOML files")]
    pub vocabulary_dir: Option<PathBuf>,

    #[arg(short, long, help = "Project configuration file")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Search this many enclosing tags for a match before reporting a mismatch"
    )]
    pub recovery_depth: Option<usize>,

    #[arg(long, help = "Stop at the first closing tag with nothing open")]
    pub halt_on_unexpected_close: bool,

    #[arg(long, value_enum, help = "Output format")]
    pub format: Option<OutputFormat>,

    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    #[arg(long, help = "List known vocabularies and exit")]
    pub list_vocabularies: bool,
}

/// Contents of a project configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub vocabulary: Option<String>,
    /// Extra tags added to the selected vocabulary
    pub tags: Option<Vec<String>>,
    pub recovery_depth: Option<usize>,
    pub halt_on_unexpected_close: Option<bool>,
    pub format: Option<OutputFormat>,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where the vocabulary of a run comes from
#[derive(Debug, Clone, PartialEq)]
pub enum VocabularySource {
    Inline(Vec<String>),
    File(PathBuf),
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryMode {
    Strict,
    Lookahead(usize),
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub files: Vec<PathBuf>,
    pub vocabulary: VocabularySource,
    pub extra_tags: Vec<String>,
    /// Directories searched for vocabulary files, in increasing priority
    pub vocabulary_dirs: Vec<(PathBuf, VocabularyPriority)>,
    pub recovery: RecoveryMode,
    pub halt_on_unexpected_close: bool,
    pub format: OutputFormat,
    pub log_level: String,
    pub list_vocabularies: bool,
    pub project_config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self, ConfigError> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(mut args: Args) -> Result<Self, ConfigError> {
        let project_config_path = match args.config.take() {
            Some(path) => Some(path),
            None => {
                let candidate = PathBuf::from(PROJECT_CONFIG_FILE);
                candidate.is_file().then_some(candidate)
            }
        };

        let project = match &project_config_path {
            Some(path) => {
                log::debug!("Loading project config {}", path.display());
                ProjectConfig::load(path)?
            }
            None => ProjectConfig::default(),
        };

        Self::merge(args, project, project_config_path)
    }

    /// Merge arguments over a project config. Command-line values win.
    pub fn merge(
        args: Args,
        project: ProjectConfig,
        project_config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let vocabulary = if let Some(tags) = args.tags {
            VocabularySource::Inline(tags)
        } else if let Some(path) = args.vocabulary_file {
            VocabularySource::File(path)
        } else {
            let name = args
                .vocabulary
                .or(project.vocabulary)
                .unwrap_or_else(|| DEFAULT_VOCABULARY.to_string());
            VocabularySource::Named(name)
        };

        let recovery = match args.recovery_depth.or(project.recovery_depth) {
            None => RecoveryMode::Strict,
            Some(0) => return Err(ConfigError::ZeroRecoveryDepth),
            Some(depth) => RecoveryMode::Lookahead(depth),
        };

        let mut vocabulary_dirs = default_vocabulary_dirs();
        if let Some(dir) = args.vocabulary_dir {
            vocabulary_dirs.push((dir, VocabularyPriority::Explicit));
        }

        Ok(Config {
            files: args.files,
            vocabulary,
            extra_tags: project.tags.unwrap_or_default(),
            vocabulary_dirs,
            recovery,
            halt_on_unexpected_close: args.halt_on_unexpected_close
                || project.halt_on_unexpected_close.unwrap_or(false),
            format: args.format.or(project.format).unwrap_or_default(),
            log_level: args.log_level,
            list_vocabularies: args.list_vocabularies,
            project_config_path,
        })
    }

    /// Built-in vocabularies plus everything found in the vocabulary directories
    pub fn load_registry(&self) -> VocabularyRegistry {
        let mut registry = VocabularyRegistry::with_built_ins();
        for (dir, priority) in &self.vocabulary_dirs {
            let count = registry.load_directory(dir, *priority);
            if count > 0 {
                log::debug!("Loaded {} vocabularies from {}", count, dir.display());
            }
        }
        registry
    }

    /// The vocabulary for this run. Project extra tags extend named and file
    /// vocabularies; an inline `--tags` list is used as given.
    pub fn resolve_vocabulary(&self, registry: &VocabularyRegistry) -> Result<Vocabulary, ConfigError> {
        let base = match &self.vocabulary {
            VocabularySource::Inline(tags) => {
                return Vocabulary::new("inline", tags.iter().map(|t| t.trim()));
            }
            VocabularySource::File(path) => load_vocabulary_file(path)?,
            VocabularySource::Named(name) => registry.resolve(name)?.clone(),
        };

        if self.extra_tags.is_empty() {
            Ok(base)
        } else {
            base.extended(self.extra_tags.iter().cloned())
        }
    }

    pub fn balance_checker(&self) -> BalanceChecker {
        let checker = BalanceChecker::new().halt_on_unexpected_close(self.halt_on_unexpected_close);
        match self.recovery {
            RecoveryMode::Strict => checker,
            RecoveryMode::Lookahead(depth) => checker.with_recovery(Box::new(Lookahead::new(depth))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tagcheck").chain(argv.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let config = Config::merge(args(&["page.tsx"]), ProjectConfig::default(), None).unwrap();
        assert_eq!(config.files, vec![PathBuf::from("page.tsx")]);
        assert_eq!(
            config.vocabulary,
            VocabularySource::Named(DEFAULT_VOCABULARY.to_string())
        );
        assert_eq!(config.recovery, RecoveryMode::Strict);
        assert!(!config.halt_on_unexpected_close);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_files_required() {
        assert!(Args::try_parse_from(["tagcheck"]).is_err());
        assert!(Args::try_parse_from(["tagcheck", "--list-vocabularies"]).is_ok());
    }

    #[test]
    fn test_inline_tags_take_precedence() {
        let config = Config::merge(
            args(&["--tags", "div,span", "--vocabulary", "html", "a.html"]),
            ProjectConfig::default(),
            None,
        )
        .unwrap();
        assert_eq!(
            config.vocabulary,
            VocabularySource::Inline(vec!["div".into(), "span".into()])
        );
    }

    #[test]
    fn test_cli_overrides_project() {
        let project = ProjectConfig {
            vocabulary: Some("html".into()),
            recovery_depth: Some(2),
            halt_on_unexpected_close: Some(true),
            format: Some(OutputFormat::Json),
            tags: None,
        };
        let config = Config::merge(
            args(&["--vocabulary", "react-html", "--recovery-depth", "4", "--format", "text", "x"]),
            project,
            None,
        )
        .unwrap();
        assert_eq!(config.vocabulary, VocabularySource::Named("react-html".into()));
        assert_eq!(config.recovery, RecoveryMode::Lookahead(4));
        assert!(config.halt_on_unexpected_close);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_project_values_used() {
        let project: ProjectConfig = toml::from_str(
            r#"
            vocabulary = "html"
            tags = ["Card"]
            recovery_depth = 3
            format = "json"
            "#,
        )
        .unwrap();
        let config = Config::merge(args(&["x"]), project, None).unwrap();
        assert_eq!(config.vocabulary, VocabularySource::Named("html".into()));
        assert_eq!(config.extra_tags, vec!["Card".to_string()]);
        assert_eq!(config.recovery, RecoveryMode::Lookahead(3));
        assert_eq!(config.format, OutputFormat::Json);

        let vocabulary = config.resolve_vocabulary(&config.load_registry()).unwrap();
        assert!(vocabulary.contains("Card"));
        assert!(vocabulary.contains("article"));
    }

    #[test]
    fn test_from_args_loads_explicit_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "vocabulary = \"html\"\nrecovery_depth = 2\n").unwrap();
        let path_arg = path.to_string_lossy().into_owned();

        let config = Config::from_args(args(&["--config", &path_arg, "page.html"])).unwrap();
        assert_eq!(config.project_config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.vocabulary, VocabularySource::Named("html".into()));
        assert_eq!(config.recovery, RecoveryMode::Lookahead(2));
        assert_eq!(config.files, vec![PathBuf::from("page.html")]);
    }

    #[test]
    fn test_from_args_missing_config_is_error() {
        let err = Config::from_args(args(&["--config", "/no/such/tagcheck.toml", "x"])).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn test_unknown_project_key_rejected() {
        assert!(toml::from_str::<ProjectConfig>("vocab = \"html\"").is_err());
    }

    #[test]
    fn test_zero_recovery_depth_rejected() {
        let err = Config::merge(args(&["--recovery-depth", "0", "x"]), ProjectConfig::default(), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroRecoveryDepth));
    }

    #[test]
    fn test_empty_inline_vocabulary_rejected() {
        let config = Config::merge(args(&["--tags", "", "x"]), ProjectConfig::default(), None).unwrap();
        let err = config
            .resolve_vocabulary(&VocabularyRegistry::with_built_ins())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTagName { .. } | ConfigError::EmptyVocabulary(_)));
    }

    #[test]
    fn test_unknown_named_vocabulary() {
        let config =
            Config::merge(args(&["--vocabulary", "svelte", "x"]), ProjectConfig::default(), None).unwrap();
        let err = config
            .resolve_vocabulary(&VocabularyRegistry::with_built_ins())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownVocabulary { .. }));
    }
}
