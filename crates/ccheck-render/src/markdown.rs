use crate::{RenderableReport, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("# ccheck report: `{}`\n\n", report.data.check));
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Findings: {}\n",
        verdict,
        report.findings.len()
    ));
    if let Some(cmd) = &report.data.command {
        out.push_str(&format!("- Command: `{}`\n", cmd));
    }
    out.push('\n');

    if let Some(cause) = &report.data.cause {
        out.push_str(&format!("> {}\n\n", cause));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        out.push_str(&format!("- `{}` / `{}`: {}", f.check_id, f.code, f.message));
        if let Some(loc) = &f.location {
            match loc.line {
                Some(line) => out.push_str(&format!(" (`{}`:{})", loc.path, line)),
                None => out.push_str(&format!(" (`{}`)", loc.path)),
            }
        }
        out.push('\n');

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
