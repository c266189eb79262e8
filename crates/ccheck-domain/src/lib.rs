//! Pure compile-command construction and valgrind report analysis (no IO).
//!
//! Input: a report text or a parsed report plus the run directory.
//! Output: deduplicated log messages + findings.

#![forbid(unsafe_code)]

pub mod command;
pub mod model;
pub mod parse;

mod analyze;
mod fingerprint;

#[cfg(test)]
mod proptest;

pub use analyze::{Analysis, INDENT, analyze, analyze_each};
pub use fingerprint::fingerprint_for_message;
pub use model::{LEAK_KIND_PREFIX, MessageField, StackFrame, ValgrindError, ValgrindReport};
pub use parse::{ReportError, parse_report};
