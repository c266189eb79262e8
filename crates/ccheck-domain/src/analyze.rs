use crate::fingerprint::fingerprint_for_message;
use crate::model::{MessageField, StackFrame, ValgrindError, ValgrindReport};
use crate::parse::ReportError;
use camino::Utf8Path;
use ccheck_types::{Finding, Location, Severity, ids};
use serde_json::json;
use std::collections::HashSet;

/// Prefix every emitted log line carries.
pub const INDENT: &str = "\t";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Analysis {
    /// Distinct log lines in first-seen order, each starting with [`INDENT`].
    pub messages: Vec<String>,
    /// One finding per entry in `messages`.
    pub findings: Vec<Finding>,
}

impl Analysis {
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Turn a parsed report into one log line per distinct error.
///
/// `run_dir` is the directory the checked program was built and run in; only frames whose
/// `obj` lies below it are treated as student code.
pub fn analyze(report: &ValgrindReport, run_dir: &Utf8Path) -> Result<Analysis, ReportError> {
    let mut analysis = Analysis::default();
    analyze_each(report, run_dir, |msg, finding| {
        analysis.messages.push(msg);
        analysis.findings.push(finding);
    })?;
    Ok(analysis)
}

/// Like [`analyze`], but hands each distinct message to `emit` as soon as it is found.
///
/// A record with a missing field stops the walk with an error; messages emitted before it
/// have already been delivered.
pub fn analyze_each(
    report: &ValgrindReport,
    run_dir: &Utf8Path,
    mut emit: impl FnMut(String, Finding),
) -> Result<(), ReportError> {
    let mut reported: HashSet<String> = HashSet::new();

    for (i, error) in report.errors.iter().enumerate() {
        let field = MessageField::for_kind(&error.kind);
        let what = error.message().ok_or(ReportError::MissingField {
            index: i + 1,
            field: field.path(),
        })?;

        let frame = first_frame_in(&error.frames, run_dir);
        let location = frame.and_then(frame_location);

        let mut body = what.to_string();
        if let Some((file, line)) = location {
            body.push_str(&format!(": (file: {file}, line: {line})"));
        }

        let msg = format!("{INDENT}{body}");
        if reported.insert(msg.clone()) {
            emit(msg, finding(error, &body, frame, location));
        }
    }

    Ok(())
}

/// First frame whose object file sits inside `run_dir`. The search stops there even if that
/// frame has no file/line information.
fn first_frame_in<'a>(frames: &'a [StackFrame], run_dir: &Utf8Path) -> Option<&'a StackFrame> {
    frames.iter().find(|frame| {
        frame
            .obj
            .as_deref()
            .is_some_and(|obj| is_inside(Utf8Path::new(obj), run_dir))
    })
}

/// `run_dir` is a proper ancestor of `path` (compared component-wise).
fn is_inside(path: &Utf8Path, run_dir: &Utf8Path) -> bool {
    path != run_dir && path.starts_with(run_dir)
}

fn frame_location(frame: &StackFrame) -> Option<(&str, &str)> {
    Some((frame.file.as_deref()?, frame.line.as_deref()?))
}

fn finding(
    error: &ValgrindError,
    body: &str,
    frame: Option<&StackFrame>,
    location: Option<(&str, &str)>,
) -> Finding {
    let code = if error.is_leak() {
        ids::CODE_MEMORY_LEAK
    } else {
        ids::CODE_MEMORY_ERROR
    };

    Finding {
        severity: Severity::Error,
        check_id: ids::CHECK_C_VALGRIND.to_string(),
        code: code.to_string(),
        message: body.to_string(),
        location: location.map(|(file, line)| Location {
            path: file.to_string(),
            line: line.trim().parse().ok(),
        }),
        help: None,
        fingerprint: Some(fingerprint_for_message(ids::CHECK_C_VALGRIND, code, body)),
        data: json!({
            "kind": error.kind,
            "obj": frame.and_then(|f| f.obj.as_deref()),
        }),
    }
}
