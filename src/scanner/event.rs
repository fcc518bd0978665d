//! Tag events produced by the scanner.

/// One recognized tag, in document order.
///
/// `line` is the 1-based line holding the tag's opening `<`, even when the
/// tag itself spans several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Open { name: String, line: usize },
    Close { name: String, line: usize },
    SelfClosing { name: String, line: usize },
}

impl TagEvent {
    /// Classify a complete token.
    ///
    /// A token ending in `/>` is self-closing even when it starts with `</`.
    pub fn classify(name: String, line: usize, is_close: bool, self_closing: bool) -> Self {
        if self_closing {
            TagEvent::SelfClosing { name, line }
        } else if is_close {
            TagEvent::Close { name, line }
        } else {
            TagEvent::Open { name, line }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TagEvent::Open { name, .. }
            | TagEvent::Close { name, .. }
            | TagEvent::SelfClosing { name, .. } => name,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            TagEvent::Open { line, .. }
            | TagEvent::Close { line, .. }
            | TagEvent::SelfClosing { line, .. } => *line,
        }
    }
}
