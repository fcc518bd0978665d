//! Structural defects found by the balance checker.

use serde::Serialize;

/// A tag that is open on the checker's stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    pub name: String,
    pub line: usize,
}

/// A tag-balance defect, in the order it was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A closing tag seen while no tag was open
    UnexpectedClose { name: String, line: usize },
    /// A closing tag whose name differs from the innermost open tag
    Mismatch {
        opened_name: String,
        opened_line: usize,
        closed_name: String,
        closed_line: usize,
    },
    /// A tag still open when the document ended
    Unclosed { name: String, line: usize },
}

impl Diagnostic {
    pub fn unclosed(frame: StackFrame) -> Self {
        Diagnostic::Unclosed {
            name: frame.name,
            line: frame.line,
        }
    }

    /// Line the defect is reported against
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::UnexpectedClose { line, .. } | Diagnostic::Unclosed { line, .. } => *line,
            Diagnostic::Mismatch { closed_line, .. } => *closed_line,
        }
    }

    pub fn is_unclosed(&self) -> bool {
        matches!(self, Diagnostic::Unclosed { .. })
    }
}
