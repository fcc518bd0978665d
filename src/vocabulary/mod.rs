//! Tag Vocabularies
//!
//! The closed set of tag names a scanner recognizes, and where those sets
//! come from.

pub mod registry;
pub mod schema;

pub use registry::{
    default_vocabulary_dirs, load_vocabulary_file, LoadedVocabulary, VocabularyPriority,
    VocabularyRegistry, DEFAULT_VOCABULARY,
};
pub use schema::{is_valid_tag_name, Vocabulary, VocabularyFile};
