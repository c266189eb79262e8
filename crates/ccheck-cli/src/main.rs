//! CLI entry point for ccheck.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `ccheck-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use ccheck_app::{
    CheckInput, CheckRequest, ShellRunner, parse_report_json, render_annotations,
    render_markdown, report_exit_code, run_check, runtime_error_report, serialize_report,
    to_renderable,
};
use ccheck_settings::Overrides;
use ccheck_types::ReportEnvelope;
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser, Debug)]
#[command(
    name = "ccheck",
    version,
    about = "Compile C programs and check them for memory errors under valgrind"
)]
struct Cli {
    /// Directory the program is built and run in.
    #[arg(long, default_value = ".")]
    run_dir: Utf8PathBuf,

    /// Path to ccheck config TOML, relative to the run directory.
    #[arg(long, default_value = "ccheck.toml")]
    config: Utf8PathBuf,

    /// Override the compiler.
    #[arg(long)]
    cc: Option<String>,

    /// Override the compiler flags.
    #[arg(long, allow_hyphen_values = true)]
    cflags: Option<String>,

    /// Override the valgrind executable.
    #[arg(long)]
    valgrind: Option<String>,

    /// Print the check log and enable debug tracing.
    #[arg(long)]
    log: bool,

    /// Where to write the JSON report.
    #[arg(long)]
    report_out: Option<Utf8PathBuf>,

    /// Where to write the Markdown report.
    #[arg(long)]
    markdown_out: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a C source file.
    Compile {
        /// Source file, relative to the run directory.
        file: String,

        /// Output executable (default: the source name without `.c`).
        #[arg(long)]
        exe_name: Option<String>,
    },

    /// Run a command under valgrind and fail on any reported error.
    Valgrind {
        /// Also require the program to exit with this status.
        #[arg(long)]
        exit: Option<i32>,

        /// Command to run, after `--`. Each argument reaches the program unchanged.
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Check an existing valgrind XML report.
    Analyze {
        /// Path to the XML file written by `valgrind --xml=yes`.
        xml: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log);

    match &cli.cmd {
        Commands::Compile { file, exe_name } => cmd_check(
            &cli,
            CheckRequest::Compile {
                file_name: file.clone(),
                exe_name: exe_name.clone(),
            },
        ),
        Commands::Valgrind { exit, command } => cmd_check(
            &cli,
            CheckRequest::Valgrind {
                command: shell_command(command)?,
                exit: *exit,
            },
        ),
        Commands::Analyze { xml } => cmd_check(&cli, CheckRequest::Analyze { xml: xml.clone() }),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
    }
}

/// Re-quote argv so `sh -c` hands the program exactly the arguments given after `--`.
fn shell_command(argv: &[String]) -> anyhow::Result<String> {
    shlex::try_join(argv.iter().map(String::as_str)).context("quote command arguments")
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(cli: &Cli, request: CheckRequest) -> anyhow::Result<()> {
    let run_dir = cli
        .run_dir
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.run_dir.clone());
    let check = request.name();

    let result = (|| -> anyhow::Result<i32> {
        if !run_dir.is_dir() {
            anyhow::bail!("run directory does not exist: {}", run_dir);
        }
        // Missing config file is allowed (defaults apply).
        let cfg_path = run_dir.join(&cli.config);
        let cfg_text = std::fs::read_to_string(&cfg_path).unwrap_or_default();

        let overrides = Overrides {
            cc: cli.cc.clone(),
            cflags: cli.cflags.clone(),
            valgrind: cli.valgrind.clone(),
        };

        let runner = ShellRunner;
        let input = CheckInput {
            run_dir: &run_dir,
            config_text: &cfg_text,
            overrides,
            runner: &runner,
            request,
        };
        let output = run_check(input)?;
        let report = &output.report;

        if cli.log {
            for line in &report.data.log {
                println!("{line}");
            }
        }
        if let Some(cause) = &report.data.cause {
            eprintln!("ccheck: {check}: {cause}");
        }

        if let Some(path) = &cli.report_out {
            write_report_file(path, report).context("write report json")?;
        }
        if let Some(path) = &cli.markdown_out {
            let md = render_markdown(&to_renderable(report));
            write_text_file(path, &md).context("write markdown")?;
        }

        Ok(report_exit_code(report))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(path) = &cli.report_out {
                let report = runtime_error_report(check, &format!("{err:#}"));
                let _ = write_report_file(path, &report);
            }
            eprintln!("ccheck error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &ReportEnvelope) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report)?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<ReportEnvelope> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    match output {
        Some(out_path) => write_text_file(out_path, &md).context("write markdown output")?,
        None => print!("{}", md),
    }
    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}
