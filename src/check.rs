//! Check driver
//!
//! Reads the input documents, runs a fresh scan/check pass over each one and
//! hands the diagnostics to a reporter.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::balance::{BalanceChecker, BalanceReport};
use crate::config::Config;
use crate::error::{CheckError, Result};
use crate::report::reporter_for;
use crate::scanner::Scanner;

/// A document loaded into memory
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
}

impl Document {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }
}

/// Read every document up front so an unreadable input aborts the run
/// before anything is scanned.
pub fn read_documents(paths: &[PathBuf]) -> Result<Vec<Document>> {
    paths.iter().map(|path| Document::read(path)).collect()
}

/// Scan and check one text.
pub fn check_text(scanner: &Scanner, checker: &BalanceChecker, text: &str) -> BalanceReport {
    checker.check(scanner.events(text))
}

/// Totals over a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub documents: usize,
    pub diagnostics: usize,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.diagnostics == 0
    }
}

/// Check every configured document and write the reports to `out`.
pub fn run<W: Write>(config: &Config, out: W) -> Result<RunSummary> {
    let registry = config.load_registry();
    let vocabulary = config.resolve_vocabulary(&registry)?;
    log::info!(
        "Using vocabulary '{}' ({} tags)",
        vocabulary.name(),
        vocabulary.len()
    );

    let scanner = Scanner::new(&vocabulary)?;
    let checker = config.balance_checker();
    let documents = read_documents(&config.files)?;

    let show_paths = documents.len() > 1;
    let mut reporter = reporter_for(config.format, out);
    let mut summary = RunSummary::default();

    for document in &documents {
        let report = check_text(&scanner, &checker, &document.content);
        log::debug!(
            "{}: {} diagnostics, {} frames left open{}",
            document.path.display(),
            report.diagnostics.len(),
            report.final_stack.len(),
            if report.halted { ", halted" } else { "" }
        );

        let source = show_paths.then_some(document.path.as_path());
        reporter
            .report(source, &report.diagnostics)
            .map_err(CheckError::Report)?;

        summary.documents += 1;
        summary.diagnostics += report.diagnostics.len();
    }

    Ok(summary)
}
