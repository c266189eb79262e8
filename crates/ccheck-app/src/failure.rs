use ccheck_domain::ReportError;
use ccheck_types::{Finding, Severity, ids};
use serde_json::json;

/// Why a check did not pass.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// The compiler exited with an unexpected status.
    #[error("compilation failed: expected exit code {expected}, not {}", status_text(.actual))]
    Build {
        expected: i32,
        actual: Option<i32>,
        output: String,
    },

    #[error("expected exit code {expected}, not {}", status_text(.actual))]
    Exit {
        expected: i32,
        actual: Option<i32>,
        output: String,
    },

    /// Valgrind reported errors; the individual messages are in the check log.
    #[error("valgrind tests failed; rerun with --log for more information.")]
    Valgrind { errors: usize },

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("{0}")]
    Internal(String),
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "a signal".to_string(),
    }
}

impl Failure {
    /// Failures of the tool itself rather than of the checked program.
    pub fn is_internal(&self) -> bool {
        matches!(self, Failure::Report(_) | Failure::Internal(_))
    }

    /// Finding describing this failure, if it is not already covered by per-error findings.
    pub fn finding(&self) -> Option<Finding> {
        let (check_id, code, data) = match self {
            Failure::Build {
                expected,
                actual,
                output,
            } => (
                ids::CHECK_C_COMPILE,
                ids::CODE_COMPILE_FAILED,
                json!({ "expected": expected, "actual": actual, "output": output }),
            ),
            Failure::Exit {
                expected,
                actual,
                output,
            } => (
                ids::CHECK_C_EXIT,
                ids::CODE_EXIT_MISMATCH,
                json!({ "expected": expected, "actual": actual, "output": output }),
            ),
            Failure::Valgrind { .. } => return None,
            Failure::Report(_) | Failure::Internal(_) => (
                ids::CHECK_TOOL_RUNTIME,
                ids::CODE_RUNTIME_ERROR,
                serde_json::Value::Null,
            ),
        };

        Some(Finding {
            severity: Severity::Error,
            check_id: check_id.to_string(),
            code: code.to_string(),
            message: self.to_string(),
            location: None,
            help: None,
            fingerprint: None,
            data,
        })
    }
}
