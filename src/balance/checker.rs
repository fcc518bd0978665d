//! Balance Checker
//!
//! Single-pass stack automaton over the tag event stream. No lookahead and
//! no backtracking; every run starts with an empty stack.

use super::diagnostic::{Diagnostic, StackFrame};
use super::recovery::{RecoveryStrategy, Resolution, StrictPop};
use crate::scanner::TagEvent;

/// Outcome of checking one event stream
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BalanceReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Frames still open when the stream ended, bottom first
    pub final_stack: Vec<StackFrame>,
    /// Set when the run stopped at an unexpected closing tag
    pub halted: bool,
}

impl BalanceReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug)]
pub struct BalanceChecker {
    recovery: Box<dyn RecoveryStrategy>,
    halt_on_unexpected_close: bool,
}

impl Default for BalanceChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceChecker {
    /// Strict pop-and-continue checker that never stops early
    pub fn new() -> Self {
        Self {
            recovery: Box::new(StrictPop),
            halt_on_unexpected_close: false,
        }
    }

    pub fn with_recovery(mut self, recovery: Box<dyn RecoveryStrategy>) -> Self {
        self.recovery = recovery;
        self
    }

    /// Stop processing at the first closing tag seen with nothing open
    pub fn halt_on_unexpected_close(mut self, halt: bool) -> Self {
        self.halt_on_unexpected_close = halt;
        self
    }

    /// Check a complete event stream.
    pub fn check<I>(&self, events: I) -> BalanceReport
    where
        I: IntoIterator<Item = TagEvent>,
    {
        let mut stack: Vec<StackFrame> = Vec::new();
        let mut report = BalanceReport::default();

        for event in events {
            match event {
                TagEvent::SelfClosing { .. } => {}
                TagEvent::Open { name, line } => stack.push(StackFrame { name, line }),
                TagEvent::Close { name, line } => {
                    if stack.is_empty() {
                        report
                            .diagnostics
                            .push(Diagnostic::UnexpectedClose { name, line });
                        if self.halt_on_unexpected_close {
                            log::debug!("Halting at unexpected closing tag on line {}", line);
                            report.halted = true;
                            break;
                        }
                        continue;
                    }

                    self.close(&mut stack, name, line, &mut report.diagnostics);
                }
            }
        }

        report.final_stack = stack.clone();
        report
            .diagnostics
            .extend(stack.into_iter().rev().map(Diagnostic::unclosed));

        report
    }

    fn close(
        &self,
        stack: &mut Vec<StackFrame>,
        name: String,
        line: usize,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        match self.recovery.resolve(stack, &name) {
            Resolution::PopTop => {
                let Some(top) = stack.pop() else {
                    debug_assert!(false, "close resolved against an empty stack");
                    return;
                };
                if top.name != name {
                    diagnostics.push(Diagnostic::Mismatch {
                        opened_name: top.name,
                        opened_line: top.line,
                        closed_name: name,
                        closed_line: line,
                    });
                }
            }
            Resolution::PopTo(idx) => {
                debug_assert!(idx < stack.len(), "recovery resolved outside the stack");
                debug_assert_eq!(stack.get(idx).map(|f| f.name.as_str()), Some(name.as_str()));

                let skipped = stack.split_off(idx + 1);
                diagnostics.extend(skipped.into_iter().rev().map(Diagnostic::unclosed));
                stack.pop();
            }
        }
    }
}
