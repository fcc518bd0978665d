//! Vocabulary Schema Types
//!
//! On-disk TOML shape of a vocabulary file and the validated runtime form.

use serde::Deserialize;
use std::collections::BTreeSet;

use crate::error::ConfigError;

/// Root vocabulary file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VocabularyFile {
    pub vocabulary: VocabularyDef,
}

/// Vocabulary table of a vocabulary file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VocabularyDef {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Validated, immutable set of recognized tag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    name: String,
    description: Option<String>,
    tags: BTreeSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary, rejecting an empty tag list or malformed names.
    pub fn new<I, S>(name: impl Into<String>, tags: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut set = BTreeSet::new();

        for tag in tags {
            let tag = tag.into();
            if !is_valid_tag_name(&tag) {
                return Err(ConfigError::InvalidTagName {
                    vocabulary: name,
                    tag,
                });
            }
            set.insert(tag);
        }

        if set.is_empty() {
            return Err(ConfigError::EmptyVocabulary(name));
        }

        Ok(Self {
            name,
            description: None,
            tags: set,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tag names in sorted order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Extend with additional tags, validated the same way as at construction.
    pub fn extended<I, S>(self, extra: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let description = self.description;
        let tags = self.tags.into_iter().chain(extra.into_iter().map(Into::into));
        Ok(Self::new(self.name, tags)?.with_description(description))
    }
}

impl TryFrom<VocabularyFile> for Vocabulary {
    type Error = ConfigError;

    fn try_from(file: VocabularyFile) -> Result<Self, Self::Error> {
        let def = file.vocabulary;
        Ok(Vocabulary::new(def.name, def.tags)?.with_description(def.description))
    }
}

/// A tag name starts with an ASCII letter and continues with ASCII
/// alphanumerics or `-`, `_`, `.`, `:`.
pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
