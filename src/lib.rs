//! tagcheck
//!
//! A tag-balance validator for markup and JSX documents.
//!
//! This library provides:
//! - Line-oriented tag scanning over a configurable vocabulary
//! - Stack-based balance checking with pluggable recovery
//! - Text and JSON reporting
//! - Configuration and vocabulary management
//!
//! ```
//! use tagcheck::{check_text, BalanceChecker, Scanner, Vocabulary};
//!
//! let vocabulary = Vocabulary::new("demo", ["div", "span"]).unwrap();
//! let scanner = Scanner::new(&vocabulary).unwrap();
//! let report = check_text(&scanner, &BalanceChecker::new(), "<div><span></div>");
//! assert_eq!(report.diagnostics.len(), 2);
//! ```

pub mod balance;
pub mod check;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod vocabulary;

pub use balance::{BalanceChecker, BalanceReport, Diagnostic, StackFrame};
pub use check::{check_text, run, RunSummary};
pub use config::Config;
pub use error::{CheckError, ConfigError};
pub use report::{render_text, OutputFormat};
pub use scanner::{Scanner, TagEvent};
pub use vocabulary::{Vocabulary, VocabularyRegistry};
