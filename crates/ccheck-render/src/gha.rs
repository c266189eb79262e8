use crate::RenderableReport;

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::error file={path},line={line}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.findings {
        let mut meta = String::new();
        if let Some(loc) = &f.location {
            meta.push_str(&format!("file={}", loc.path));
            if let Some(line) = loc.line {
                meta.push_str(&format!(",line={}", line));
            }
        }

        let message = format!("[{}:{}] {}", f.check_id, f.code, f.message)
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");

        if meta.is_empty() {
            out.push(format!("::error::{}", message));
        } else {
            out.push(format!("::error {}::{}", meta, message));
        }
    }

    out
}
