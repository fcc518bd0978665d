//! Balance Checking
//!
//! Nesting validation over the scanner's event stream, kept apart from
//! scanning and reporting.

pub mod checker;
pub mod diagnostic;
pub mod recovery;

pub use checker::{BalanceChecker, BalanceReport};
pub use diagnostic::{Diagnostic, StackFrame};
pub use recovery::{Lookahead, RecoveryStrategy, Resolution, StrictPop};
