//! Tag Scanner
//!
//! Turns raw text into a lazy, ordered stream of [`TagEvent`]s for the tags
//! of one vocabulary. Scanning is line oriented so every event carries the
//! line number of its opening `<`.

pub mod event;
pub mod lexer;

pub use event::TagEvent;
pub use lexer::{find_tag_end, AttrState, TagEnd, TagHead, TagMatcher};

use std::iter::Enumerate;
use std::str::Lines;

use crate::error::ConfigError;
use crate::vocabulary::Vocabulary;

/// Scanner bound to a single vocabulary. The matcher is compiled once here
/// and shared by every scan.
#[derive(Debug, Clone)]
pub struct Scanner {
    vocabulary_name: String,
    matcher: TagMatcher,
}

impl Scanner {
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, ConfigError> {
        let matcher = TagMatcher::new(vocabulary)?;
        log::trace!(
            "Compiled tag matcher for vocabulary '{}' ({} tags)",
            vocabulary.name(),
            vocabulary.len()
        );

        Ok(Self {
            vocabulary_name: vocabulary.name().to_string(),
            matcher,
        })
    }

    pub fn vocabulary_name(&self) -> &str {
        &self.vocabulary_name
    }

    /// Lazily scan `text`. Each call starts from a clean state.
    pub fn events<'a>(&'a self, text: &'a str) -> Events<'a> {
        Events {
            matcher: &self.matcher,
            lines: text.lines().enumerate(),
            current: None,
            pos: 0,
            pending: None,
        }
    }
}

/// A tag whose closing `>` has not been seen yet
#[derive(Debug)]
struct PendingTag {
    name: String,
    line: usize,
    is_close: bool,
    attrs: AttrState,
}

/// Iterator over the tag events of one document.
#[derive(Debug)]
pub struct Events<'a> {
    matcher: &'a TagMatcher,
    lines: Enumerate<Lines<'a>>,
    current: Option<(usize, &'a str)>,
    pos: usize,
    pending: Option<PendingTag>,
}

impl<'a> Events<'a> {
    fn current_line(&mut self) -> Option<(usize, &'a str)> {
        if self.current.is_none() {
            let (idx, line) = self.lines.next()?;
            self.current = Some((idx + 1, line));
            self.pos = 0;
        }
        self.current
    }
}

impl Iterator for Events<'_> {
    type Item = TagEvent;

    fn next(&mut self) -> Option<TagEvent> {
        loop {
            // An unterminated tag at end of input is dropped here.
            let (line_num, line) = self.current_line()?;

            if let Some(mut pending) = self.pending.take() {
                match find_tag_end(&line[self.pos..], &mut pending.attrs) {
                    TagEnd::Found(offset) => {
                        let gt = self.pos + offset;
                        self.pos = gt + 1;
                        return Some(TagEvent::classify(
                            pending.name,
                            pending.line,
                            pending.is_close,
                            lexer::is_self_closing(line, gt),
                        ));
                    }
                    TagEnd::Interrupted(offset) => {
                        log::trace!("Dropping unterminated <{}> from line {}", pending.name, pending.line);
                        self.pos += offset;
                    }
                    TagEnd::Continues => {
                        self.pending = Some(pending);
                        self.current = None;
                    }
                    TagEnd::Abandoned => {
                        log::trace!("Dropping unterminated <{}> from line {}", pending.name, pending.line);
                    }
                }
                continue;
            }

            let Some(head) = self.matcher.next_head(line, self.pos) else {
                self.current = None;
                continue;
            };

            let mut attrs = AttrState::default();
            match find_tag_end(&line[head.name_end..], &mut attrs) {
                TagEnd::Found(offset) => {
                    let gt = head.name_end + offset;
                    self.pos = gt + 1;
                    return Some(TagEvent::classify(
                        head.name.to_string(),
                        line_num,
                        head.is_close,
                        lexer::is_self_closing(line, gt),
                    ));
                }
                TagEnd::Interrupted(offset) => self.pos = head.name_end + offset,
                TagEnd::Continues => {
                    self.pending = Some(PendingTag {
                        name: head.name.to_string(),
                        line: line_num,
                        is_close: head.is_close,
                        attrs,
                    });
                    self.current = None;
                }
                TagEnd::Abandoned => self.pos = head.name_end,
            }
        }
    }
}
