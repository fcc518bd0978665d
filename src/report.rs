//! Diagnostic rendering
//!
//! Reporters write diagnostics in the order they were discovered; they never
//! reorder, filter or merge them.

use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::balance::Diagnostic;

/// Output format selectable from the command line or project config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub const UNCLOSED_HEADER: &str = "Unclosed tags:";

/// Render diagnostics as human-readable lines.
///
/// Each run of consecutive `Unclosed` diagnostics is placed under one
/// `Unclosed tags:` header.
pub fn render_text(diagnostics: &[Diagnostic]) -> Vec<String> {
    let mut lines = Vec::with_capacity(diagnostics.len() + 1);
    let mut in_unclosed_group = false;

    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::UnexpectedClose { name, line } => {
                lines.push(format!("Unexpected closing tag </{}> at line {}", name, line));
            }
            Diagnostic::Mismatch {
                opened_name,
                opened_line,
                closed_name,
                closed_line,
            } => {
                lines.push(format!(
                    "Mismatch: <{}> from line {} closed by </{}> at line {}",
                    opened_name, opened_line, closed_name, closed_line
                ));
            }
            Diagnostic::Unclosed { name, line } => {
                if !in_unclosed_group {
                    lines.push(UNCLOSED_HEADER.to_string());
                }
                lines.push(format!("<{}> at line {}", name, line));
            }
        }
        in_unclosed_group = diagnostic.is_unclosed();
    }

    lines
}

/// Sink for the diagnostics of each checked document
pub trait Reporter {
    /// `source` is `None` when a single document is checked.
    fn report(&mut self, source: Option<&Path>, diagnostics: &[Diagnostic]) -> io::Result<()>;
}

/// Plain text lines, one block per document
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, source: Option<&Path>, diagnostics: &[Diagnostic]) -> io::Result<()> {
        if diagnostics.is_empty() {
            return Ok(());
        }

        if let Some(path) = source {
            writeln!(self.out, "{}:", path.display())?;
        }
        for line in render_text(diagnostics) {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a Path>,
    diagnostics: &'a [Diagnostic],
}

/// One JSON object per document per line
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, source: Option<&Path>, diagnostics: &[Diagnostic]) -> io::Result<()> {
        let document = JsonDocument {
            path: source,
            diagnostics,
        };
        serde_json::to_writer(&mut self.out, &document)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Reporter for `format` writing to `out`
pub fn reporter_for<'w, W: Write + 'w>(format: OutputFormat, out: W) -> Box<dyn Reporter + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextReporter::new(out)),
        OutputFormat::Json => Box::new(JsonReporter::new(out)),
    }
}
