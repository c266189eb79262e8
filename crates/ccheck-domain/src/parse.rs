use crate::model::{StackFrame, ValgrindError, ValgrindReport};
use roxmltree::{Document, Node};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("parse valgrind xml: {0}")]
    Xml(#[from] roxmltree::Error),

    /// 1-based position of the `error` element among its siblings.
    #[error("valgrind error #{index} has no <{field}>")]
    MissingField { index: usize, field: &'static str },
}

/// Parse a valgrind XML report.
///
/// Only direct `error` children of the root element are read; valgrind also writes
/// `status`, `errorcounts` and `suppcounts` blocks at that level, which are skipped.
pub fn parse_report(text: &str) -> Result<ValgrindReport, ReportError> {
    let doc = Document::parse(text)?;

    let errors = doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("error"))
        .enumerate()
        .map(|(i, node)| parse_error(node, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValgrindReport { errors })
}

fn parse_error(node: Node<'_, '_>, index: usize) -> Result<ValgrindError, ReportError> {
    let kind = child(node, "kind")
        .map(text_of)
        .ok_or(ReportError::MissingField {
            index,
            field: "kind",
        })?;

    let what = child(node, "what").map(text_of);
    let xwhat = child(node, "xwhat")
        .and_then(|x| child(x, "text"))
        .map(text_of);

    let frames: Vec<StackFrame> = child(node, "stack")
        .map(|stack| {
            stack
                .children()
                .filter(|n| n.has_tag_name("frame"))
                .map(parse_frame)
                .collect()
        })
        .unwrap_or_default();

    Ok(ValgrindError {
        kind,
        what,
        xwhat,
        frames,
    })
}

fn parse_frame(node: Node<'_, '_>) -> StackFrame {
    StackFrame {
        obj: child(node, "obj").map(text_of),
        file: child(node, "file").map(text_of),
        line: child(node, "line").map(text_of),
    }
}

/// First child element with the given tag name.
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// Element text; an element with no text counts as empty.
fn text_of(node: Node<'_, '_>) -> String {
    node.text().unwrap_or_default().to_string()
}
