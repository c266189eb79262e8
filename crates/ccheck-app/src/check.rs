//! The `check` use case: resolve config, run one check in a fresh context, produce a report.

use crate::c::{check_valgrind, compile, valgrind};
use crate::context::{CheckContext, CheckOutcome, run_with_hooks};
use crate::process::Runner;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use ccheck_settings::{Overrides, ResolvedConfig};
use ccheck_types::{CheckData, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, Verdict, ids};
use time::OffsetDateTime;

/// Which check to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckRequest {
    /// Compile a C source file.
    Compile {
        file_name: String,
        exe_name: Option<String>,
    },
    /// Run a command under valgrind, optionally requiring an exit code from it.
    Valgrind { command: String, exit: Option<i32> },
    /// Analyze an existing valgrind XML report.
    Analyze { xml: Utf8PathBuf },
}

impl CheckRequest {
    pub fn name(&self) -> &'static str {
        match self {
            CheckRequest::Compile { .. } => "compile",
            CheckRequest::Valgrind { .. } => "valgrind",
            CheckRequest::Analyze { .. } => "analyze",
        }
    }
}

/// Input for the check use case.
pub struct CheckInput<'a> {
    /// Directory the program is built and run in. Commands run here, and valgrind frames
    /// are attributed to student code when their object lies below it.
    pub run_dir: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    pub runner: &'a dyn Runner,
    pub request: CheckRequest,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: ReportEnvelope,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, run the requested check with its after-hooks,
/// produce a report. Check failures land in the report; only config errors are `Err`.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = if input.config_text.trim().is_empty() {
        ccheck_settings::CcheckConfigV1::default()
    } else {
        ccheck_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved = ccheck_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    tracing::debug!(
        check = input.request.name(),
        run_dir = %input.run_dir,
        cc = %resolved.effective.cc,
        "starting check"
    );

    let ctx = CheckContext::new(input.run_dir, resolved.effective.clone(), input.runner);
    let outcome = match &input.request {
        CheckRequest::Compile {
            file_name,
            exe_name,
        } => run_with_hooks(ctx, |ctx| {
            compile(ctx, file_name, exe_name.as_deref(), None, None).map(|_| ())
        }),
        CheckRequest::Valgrind { command, exit } => run_with_hooks(ctx, |ctx| {
            let process = valgrind(ctx, command)?;
            if let Some(code) = exit {
                ctx.log(format!("checking that program exited with status {code}..."));
                process.exit(*code)?;
            }
            Ok(())
        }),
        CheckRequest::Analyze { xml } => run_with_hooks(ctx, |ctx| check_valgrind(ctx, xml)),
    };

    let finished_at = OffsetDateTime::now_utc();
    let report = build_report(input.request.name(), outcome, started_at, finished_at);

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

fn build_report(
    check: &str,
    outcome: CheckOutcome,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> ReportEnvelope {
    let CheckOutcome {
        result,
        log,
        commands,
        mut findings,
    } = outcome;

    let (verdict, cause) = match result {
        Ok(()) => (Verdict::Pass, None),
        Err(failure) => {
            tracing::debug!(%failure, check, "check failed");
            findings.extend(failure.finding());
            (Verdict::Fail, Some(failure.to_string()))
        }
    };

    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "ccheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict,
        findings,
        data: CheckData {
            check: check.to_string(),
            command: commands.into_iter().next(),
            log,
            cause,
        },
    }
}

/// Map a report to an exit code: 0 = pass, 2 = check failed, 1 = the tool itself failed.
pub fn report_exit_code(report: &ReportEnvelope) -> i32 {
    if report
        .findings
        .iter()
        .any(|f| f.check_id == ids::CHECK_TOOL_RUNTIME)
    {
        return 1;
    }
    match report.verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
