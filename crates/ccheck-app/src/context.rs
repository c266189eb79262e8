//! Per-check execution context: where commands run, what they log, and what runs after.

use crate::failure::Failure;
use crate::process::{Process, Runner};
use camino::{Utf8Path, Utf8PathBuf};
use ccheck_settings::EffectiveConfig;
use ccheck_types::Finding;

type AfterHook<'a> = Box<dyn FnOnce(&mut CheckContext<'a>) -> Result<(), Failure> + 'a>;

pub struct CheckContext<'a> {
    run_dir: Utf8PathBuf,
    config: EffectiveConfig,
    runner: &'a dyn Runner,
    log: Vec<String>,
    commands: Vec<String>,
    findings: Vec<Finding>,
    after: Vec<AfterHook<'a>>,
}

/// Everything a finished check produced.
#[derive(Debug)]
pub struct CheckOutcome {
    /// First failure seen: the body's, else the first failing hook's.
    pub result: Result<(), Failure>,
    pub log: Vec<String>,
    pub commands: Vec<String>,
    pub findings: Vec<Finding>,
}

impl<'a> CheckContext<'a> {
    pub fn new(run_dir: impl Into<Utf8PathBuf>, config: EffectiveConfig, runner: &'a dyn Runner) -> Self {
        Self {
            run_dir: run_dir.into(),
            config,
            runner,
            log: Vec::new(),
            commands: Vec::new(),
            findings: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Directory the checked program is built and run in.
    pub fn run_dir(&self) -> &Utf8Path {
        &self.run_dir
    }

    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    /// Record a line in the check log.
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(target: "ccheck::log", "{line}");
        self.log.push(line);
    }

    pub fn add_findings(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Run `command` in the run directory and wait for it.
    pub fn run(&mut self, command: &str) -> Result<Process, Failure> {
        self.log(format!("running {command}..."));
        self.commands.push(command.to_string());
        tracing::debug!(command, cwd = %self.run_dir, "spawn");

        let process = self
            .runner
            .run(command, &self.run_dir)
            .map_err(|err| Failure::Internal(format!("failed to run `{command}`: {err}")))?;

        tracing::debug!(command, exit_code = ?process.exit_code(), "exited");
        Ok(process)
    }

    /// Register `hook` to run once after the check body, whether or not the body failed.
    pub fn after(&mut self, hook: impl FnOnce(&mut CheckContext<'a>) -> Result<(), Failure> + 'a) {
        self.after.push(Box::new(hook));
    }

    fn into_outcome(self, result: Result<(), Failure>) -> CheckOutcome {
        CheckOutcome {
            result,
            log: self.log,
            commands: self.commands,
            findings: self.findings,
        }
    }
}

/// Run `body`, then drain the after-hooks in registration order.
///
/// Hooks registered while draining run in the same pass. A hook failure only replaces the
/// result when the body passed; later hooks still run.
pub fn run_with_hooks<'a, F>(mut ctx: CheckContext<'a>, body: F) -> CheckOutcome
where
    F: FnOnce(&mut CheckContext<'a>) -> Result<(), Failure>,
{
    let mut result = body(&mut ctx);

    loop {
        let hooks = std::mem::take(&mut ctx.after);
        if hooks.is_empty() {
            break;
        }
        for hook in hooks {
            if let Err(failure) = hook(&mut ctx) {
                if result.is_ok() {
                    result = Err(failure);
                } else {
                    tracing::debug!(%failure, "after-hook failed after an earlier failure");
                }
            }
        }
    }

    ctx.into_outcome(result)
}
