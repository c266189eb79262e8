//! In-memory view of a valgrind `--xml=yes` report.
//!
//! Only the parts the analysis reads are kept: each top-level `error` record with its
//! kind, both message fields, and the stack frames in order.

/// Error kinds starting with this prefix are leaks and keep their message in `xwhat/text`.
pub const LEAK_KIND_PREFIX: &str = "Leak_";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValgrindReport {
    /// Error records in document order.
    pub errors: Vec<ValgrindError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValgrindError {
    pub kind: String,
    /// Text of `<what>`, if present.
    pub what: Option<String>,
    /// Text of `<xwhat><text>`, if present.
    pub xwhat: Option<String>,
    pub frames: Vec<StackFrame>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackFrame {
    /// Binary or shared object the frame's code came from.
    pub obj: Option<String>,
    pub file: Option<String>,
    /// Raw line text as valgrind wrote it.
    pub line: Option<String>,
}

/// Which element holds the human-readable message for an error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageField {
    /// `<what>`
    What,
    /// `<xwhat><text>`
    XwhatText,
}

impl MessageField {
    pub fn for_kind(kind: &str) -> Self {
        if kind.starts_with(LEAK_KIND_PREFIX) {
            MessageField::XwhatText
        } else {
            MessageField::What
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            MessageField::What => "what",
            MessageField::XwhatText => "xwhat/text",
        }
    }
}

impl ValgrindError {
    pub fn is_leak(&self) -> bool {
        self.kind.starts_with(LEAK_KIND_PREFIX)
    }

    /// Message text from the field selected by [`MessageField::for_kind`].
    pub fn message(&self) -> Option<&str> {
        match MessageField::for_kind(&self.kind) {
            MessageField::What => self.what.as_deref(),
            MessageField::XwhatText => self.xwhat.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leak_kinds_select_xwhat() {
        assert_eq!(
            MessageField::for_kind("Leak_DefinitelyLost"),
            MessageField::XwhatText
        );
        assert_eq!(
            MessageField::for_kind("Leak_PossiblyLost"),
            MessageField::XwhatText
        );
        assert_eq!(MessageField::for_kind("InvalidRead"), MessageField::What);
        // Prefix match is case-sensitive and anchored.
        assert_eq!(MessageField::for_kind("leak_lower"), MessageField::What);
        assert_eq!(MessageField::for_kind("NotLeak_"), MessageField::What);
    }

    #[test]
    fn message_reads_selected_field_only() {
        let leak = ValgrindError {
            kind: "Leak_DefinitelyLost".to_string(),
            what: Some("ignored".to_string()),
            xwhat: Some("40 bytes lost".to_string()),
            frames: Vec::new(),
        };
        assert_eq!(leak.message(), Some("40 bytes lost"));
        assert!(leak.is_leak());

        let read = ValgrindError {
            kind: "InvalidRead".to_string(),
            what: None,
            xwhat: Some("not used".to_string()),
            frames: Vec::new(),
        };
        assert_eq!(read.message(), None);
        assert!(!read.is_leak());
    }
}
