//! C-specific check operations: compile a source file, run a command under valgrind, and
//! turn valgrind's report into log lines.

use crate::context::CheckContext;
use crate::failure::Failure;
use crate::process::Process;
use camino::{Utf8Path, Utf8PathBuf};
use ccheck_domain::command::{CompileRequest, valgrind_command_line};
use ccheck_domain::{analyze_each, parse_report};

/// Compile `file_name` to `exe_name` (`file_name` minus `.c` by default).
///
/// `compiler` and `flags` fall back to the configured `cc` and `cflags`.
pub fn compile(
    ctx: &mut CheckContext<'_>,
    file_name: &str,
    exe_name: Option<&str>,
    compiler: Option<&str>,
    flags: Option<&str>,
) -> Result<Process, Failure> {
    let request = CompileRequest {
        file_name,
        exe_name,
        compiler: compiler.unwrap_or(&ctx.config().cc),
        flags: flags.unwrap_or(&ctx.config().cflags),
    };
    let command = request.command_line();

    let process = ctx.run(&command)?;
    ctx.log("checking that program exited with status 0...");
    match process.exit(0) {
        Ok(_) => Ok(process),
        Err(Failure::Exit {
            expected,
            actual,
            output,
        }) => {
            for line in output.lines() {
                ctx.log(line);
            }
            Err(Failure::Build {
                expected,
                actual,
                output,
            })
        }
        Err(other) => Err(other),
    }
}

/// Run `command` under valgrind.
///
/// The report goes to a temporary file that is analyzed by [`check_valgrind`] once the
/// enclosing check body has finished, and removed afterwards. The returned process is the
/// wrapped run, so callers can still assert on the program's own exit status.
pub fn valgrind<'a>(ctx: &mut CheckContext<'a>, command: &str) -> Result<Process, Failure> {
    let xml_file = tempfile::Builder::new()
        .prefix("ccheck-valgrind-")
        .suffix(".xml")
        .tempfile()
        .map_err(|err| Failure::Internal(format!("create valgrind report file: {err}")))?;
    let xml_path = Utf8PathBuf::from_path_buf(xml_file.path().to_path_buf()).map_err(|path| {
        Failure::Internal(format!("non UTF-8 temp path: {}", path.display()))
    })?;

    let hook_path = xml_path.clone();
    ctx.after(move |ctx| {
        let result = check_valgrind(ctx, &hook_path);
        drop(xml_file);
        result
    });

    let wrapped = valgrind_command_line(&ctx.config().valgrind, xml_path.as_str(), command);
    ctx.run(&wrapped)
}

/// Log every distinct valgrind error in the report at `xml_path`; fail if there was any.
pub fn check_valgrind(ctx: &mut CheckContext<'_>, xml_path: &Utf8Path) -> Result<(), Failure> {
    ctx.log("checking for valgrind errors... ");

    let text = std::fs::read_to_string(xml_path)
        .map_err(|err| Failure::Internal(format!("read valgrind report {xml_path}: {err}")))?;
    let report = parse_report(&text)?;

    let run_dir = ctx.run_dir().to_owned();
    let mut errors = 0;
    analyze_each(&report, &run_dir, |msg, finding| {
        errors += 1;
        ctx.log(msg);
        ctx.add_findings([finding]);
    })?;

    if errors > 0 {
        tracing::debug!(errors, "valgrind reported errors");
        return Err(Failure::Valgrind { errors });
    }
    Ok(())
}
