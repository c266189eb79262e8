use crate::failure::Failure;
use camino::Utf8Path;
use std::io;
use std::process::Command;

/// Result of one finished command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    command: String,
    /// `None` when the process was terminated by a signal.
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl Process {
    pub fn new(
        command: impl Into<String>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Captured stdout followed by stderr.
    pub fn output(&self) -> String {
        let mut out = self.stdout.clone();
        if !out.is_empty() && !out.ends_with('\n') && !self.stderr.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.stderr);
        out
    }

    /// Require exit status `expected`.
    pub fn exit(&self, expected: i32) -> Result<&Self, Failure> {
        if self.exit_code == Some(expected) {
            return Ok(self);
        }
        Err(Failure::Exit {
            expected,
            actual: self.exit_code,
            output: self.output(),
        })
    }
}

/// Executes a command line and waits for it to finish.
pub trait Runner {
    fn run(&self, command: &str, cwd: &Utf8Path) -> io::Result<Process>;
}

/// Runs commands through `sh -c`, capturing stdout and stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellRunner;

impl Runner for ShellRunner {
    fn run(&self, command: &str, cwd: &Utf8Path) -> io::Result<Process> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .output()?;

        Ok(Process::new(
            command,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_accepts_matching_status() {
        let p = Process::new("true", Some(0), "", "");
        assert!(p.exit(0).is_ok());
    }

    #[test]
    fn exit_mismatch_carries_output() {
        let p = Process::new("./hello", Some(1), "out", "err\n");
        match p.exit(0) {
            Err(Failure::Exit {
                expected,
                actual,
                output,
            }) => {
                assert_eq!(expected, 0);
                assert_eq!(actual, Some(1));
                assert_eq!(output, "out\nerr\n");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn signalled_process_never_matches() {
        let p = Process::new("./crash", None, "", "");
        assert!(p.exit(0).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn shell_runner_captures_status_and_streams() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let cwd = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let p = ShellRunner
            .run("echo hi; echo oops >&2; pwd >/dev/null; exit 3", cwd)
            .expect("run");
        assert_eq!(p.exit_code(), Some(3));
        assert_eq!(p.stdout(), "hi\n");
        assert_eq!(p.stderr(), "oops\n");
        assert_eq!(p.command(), "echo hi; echo oops >&2; pwd >/dev/null; exit 3");
    }

    #[cfg(unix)]
    #[test]
    fn shell_runner_uses_working_directory() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let cwd = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        std::fs::write(cwd.join("marker.txt"), "x").expect("write marker");

        let p = ShellRunner.run("test -f marker.txt", cwd).expect("run");
        assert_eq!(p.exit_code(), Some(0));
    }
}
