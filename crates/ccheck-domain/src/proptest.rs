//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - message deduplication
//! - first-in-tree frame selection
//! - parser robustness on arbitrary input

use crate::analyze::{INDENT, analyze};
use crate::command::default_exe_name;
use crate::model::{StackFrame, ValgrindError, ValgrindReport};
use crate::parse::parse_report;
use camino::Utf8Path;
use proptest::prelude::*;
use std::collections::HashSet;

const RUN_DIR: &str = "/srv/run";

// ============================================================================
// Strategies
// ============================================================================

fn arb_kind() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("InvalidRead".to_string()),
        Just("InvalidWrite".to_string()),
        Just("UninitValue".to_string()),
        Just("Leak_DefinitelyLost".to_string()),
        Just("Leak_StillReachable".to_string()),
    ]
}

/// Small alphabet so duplicates are common.
fn arb_text() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "lost", "Invalid read of size 4"])
        .prop_map(str::to_string)
}

fn arb_frame() -> impl Strategy<Value = StackFrame> {
    (
        prop::option::of(prop::sample::select(vec![
            "/srv/run/prog",
            "/srv/run/lib/helper.so",
            "/usr/lib/libc.so.6",
            "/srv/runner/prog",
        ])),
        prop::option::of(prop::sample::select(vec!["prog.c", "helper.c"])),
        prop::option::of(1u32..50),
    )
        .prop_map(|(obj, file, line)| StackFrame {
            obj: obj.map(str::to_string),
            file: file.map(str::to_string),
            line: line.map(|l| l.to_string()),
        })
}

fn arb_error() -> impl Strategy<Value = ValgrindError> {
    (arb_kind(), arb_text(), prop::collection::vec(arb_frame(), 0..5)).prop_map(
        |(kind, text, frames)| ValgrindError {
            what: Some(text.clone()),
            xwhat: Some(text),
            kind,
            frames,
        },
    )
}

fn arb_report() -> impl Strategy<Value = ValgrindReport> {
    prop::collection::vec(arb_error(), 0..12).prop_map(|errors| ValgrindReport { errors })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every emitted message is distinct and indented.
    #[test]
    fn messages_are_unique_and_indented(report in arb_report()) {
        let analysis = analyze(&report, Utf8Path::new(RUN_DIR)).expect("analyze");

        let unique: HashSet<&String> = analysis.messages.iter().collect();
        prop_assert_eq!(unique.len(), analysis.messages.len());
        prop_assert_eq!(analysis.findings.len(), analysis.messages.len());
        for msg in &analysis.messages {
            prop_assert!(msg.starts_with(INDENT));
        }
    }

    /// Duplicating the whole report never adds messages.
    #[test]
    fn repeating_errors_is_idempotent(report in arb_report()) {
        let once = analyze(&report, Utf8Path::new(RUN_DIR)).expect("analyze");

        let mut doubled = report.clone();
        doubled.errors.extend(report.errors.iter().cloned());
        let twice = analyze(&doubled, Utf8Path::new(RUN_DIR)).expect("analyze");

        prop_assert_eq!(once.messages, twice.messages);
    }

    /// A report is clean exactly when it has no error records.
    #[test]
    fn clean_iff_no_errors(report in arb_report()) {
        let analysis = analyze(&report, Utf8Path::new(RUN_DIR)).expect("analyze");
        prop_assert_eq!(analysis.is_clean(), report.errors.is_empty());
    }

    /// A location suffix only ever names a frame whose object is inside the run dir.
    #[test]
    fn suffix_comes_from_in_tree_frame(error in arb_error()) {
        let report = ValgrindReport { errors: vec![error.clone()] };
        let analysis = analyze(&report, Utf8Path::new(RUN_DIR)).expect("analyze");

        if let Some(loc) = &analysis.findings[0].location {
            let first_in_tree = error
                .frames
                .iter()
                .find(|f| f.obj.as_deref().is_some_and(|o| o.starts_with("/srv/run/")))
                .expect("location implies an in-tree frame");
            prop_assert_eq!(first_in_tree.file.as_deref(), Some(loc.path.as_str()));
        }
    }

    #[test]
    fn parser_never_panics(input in ".*") {
        let _ = parse_report(&input);
    }

    #[test]
    fn default_exe_name_drops_exactly_the_suffix(stem in "[a-z][a-z0-9_./]{0,15}") {
        let file = format!("{stem}.c");
        prop_assert_eq!(default_exe_name(&file), Some(stem));
    }
}
