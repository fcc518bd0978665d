//! Tag Lexer
//!
//! Finds tag heads (`<name`, `</name`) for vocabulary names and locates the
//! `>` that ends each tag. Attribute content is skipped, never interpreted.

use regex::Regex;

use crate::vocabulary::Vocabulary;

/// Start of a recognized tag within a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagHead<'a> {
    pub name: &'a str,
    pub is_close: bool,
    /// Byte offset just past the tag name
    pub name_end: usize,
}

/// Precompiled matcher for the tag heads of one vocabulary.
#[derive(Debug, Clone)]
pub struct TagMatcher {
    head: Regex,
}

impl TagMatcher {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, regex::Error> {
        // Longest names first keeps the alternation readable in debug output;
        // the trailing boundary already rules out prefix matches.
        let mut names: Vec<&str> = vocabulary.tags().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        let head = Regex::new(&format!(r"<(/?)({alternation})(?:[\s/>]|$)"))?;
        Ok(Self { head })
    }

    /// Find the next tag head in `line` at or after byte offset `from`.
    pub fn next_head<'a>(&self, line: &'a str, from: usize) -> Option<TagHead<'a>> {
        let caps = self.head.captures_at(line, from)?;
        let name = caps.get(2)?;
        let is_close = caps.get(1).is_some_and(|slash| !slash.is_empty());

        Some(TagHead {
            name: name.as_str(),
            is_close,
            name_end: name.end(),
        })
    }
}

/// Lexical state inside a tag's attribute area. Only brace depth survives a
/// line break; a quote never does.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttrState {
    quote: Option<char>,
    braces: usize,
}

/// Outcome of searching one line segment for the end of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEnd {
    /// Byte offset of the closing `>`
    Found(usize),
    /// A `<` outside quotes and braces at this offset; the tag is abandoned
    /// and scanning resumes there
    Interrupted(usize),
    /// Segment ended in attribute content; the tag continues on the next line
    Continues,
    /// Segment ended inside a quote; the tag is abandoned and the segment is
    /// rescanned as plain text
    Abandoned,
}

/// Search `s` for the `>` closing a tag, skipping quoted values (`"`, `'`,
/// and backtick template literals) and `{...}` expressions.
pub fn find_tag_end(s: &str, state: &mut AttrState) -> TagEnd {
    for (idx, ch) in s.char_indices() {
        match state.quote {
            Some(q) => {
                if ch == q {
                    state.quote = None;
                }
            }
            None => match ch {
                '"' | '\'' | '`' => state.quote = Some(ch),
                '{' => state.braces += 1,
                '}' => state.braces = state.braces.saturating_sub(1),
                '>' if state.braces == 0 => return TagEnd::Found(idx),
                '<' if state.braces == 0 => return TagEnd::Interrupted(idx),
                _ => {}
            },
        }
    }

    if state.quote.is_some() {
        TagEnd::Abandoned
    } else {
        TagEnd::Continues
    }
}

/// Whether the `>` at byte offset `gt` is preceded by `/`
pub fn is_self_closing(line: &str, gt: usize) -> bool {
    gt > 0 && line.as_bytes()[gt - 1] == b'/'
}
