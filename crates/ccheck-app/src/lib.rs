//! Use case orchestration for ccheck.
//!
//! This crate provides the application layer: the process-running and deferred-hook seams,
//! the `compile`/`valgrind` operations built on them, and the use cases that wrap a check
//! into a report. Pure logic lives in `ccheck-domain`.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod c;
mod check;
mod context;
mod failure;
mod process;
mod render;
mod report;

#[cfg(test)]
mod test_support;

pub use c::{check_valgrind, compile, valgrind};
pub use check::{CheckInput, CheckOutput, CheckRequest, report_exit_code, run_check};
pub use context::{CheckContext, CheckOutcome, run_with_hooks};
pub use failure::Failure;
pub use process::{Process, Runner, ShellRunner};
pub use render::{render_annotations, render_markdown};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
