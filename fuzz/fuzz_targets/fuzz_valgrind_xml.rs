//! Fuzz target for valgrind XML report parsing and analysis.
//!
//! Goal: a report from a crashed or truncated valgrind run may be rejected, but never panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_valgrind_xml
//! ```

#![no_main]

use camino::Utf8Path;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(report) = ccheck_domain::parse_report(text) {
            if let Ok(analysis) = ccheck_domain::analyze(&report, Utf8Path::new("/srv/run")) {
                assert_eq!(analysis.messages.len(), analysis.findings.len());
            }
        }
    }
});
