//! Recovery strategies
//!
//! Decide which open frame a closing tag consumes. The default,
//! [`StrictPop`], always takes the top of the stack, so a single mismatch
//! can cascade; [`Lookahead`] trades that determinism for fewer follow-on
//! reports.

use std::fmt;

use super::diagnostic::StackFrame;

/// Which frame a closing tag pops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Pop the top frame, reporting a mismatch if its name differs
    PopTop,
    /// Pop down to and including the frame at this stack index; the frames
    /// above it are reported unclosed
    PopTo(usize),
}

pub trait RecoveryStrategy: fmt::Debug {
    /// Called only with a non-empty stack (bottom first).
    fn resolve(&self, stack: &[StackFrame], closing: &str) -> Resolution;
}

/// Pop exactly one frame on every close
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictPop;

impl RecoveryStrategy for StrictPop {
    fn resolve(&self, _stack: &[StackFrame], _closing: &str) -> Resolution {
        Resolution::PopTop
    }
}

/// Search up to `depth` frames below the top for a same-named frame
#[derive(Debug, Clone, Copy)]
pub struct Lookahead {
    depth: usize,
}

impl Lookahead {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl RecoveryStrategy for Lookahead {
    fn resolve(&self, stack: &[StackFrame], closing: &str) -> Resolution {
        let top = stack.len() - 1;
        if stack[top].name == closing {
            return Resolution::PopTop;
        }

        stack[..top]
            .iter()
            .enumerate()
            .rev()
            .take(self.depth)
            .find(|(_, frame)| frame.name == closing)
            .map(|(idx, _)| Resolution::PopTo(idx))
            .unwrap_or(Resolution::PopTop)
    }
}
