use crate::process::{Process, Runner};
use camino::Utf8Path;
use std::cell::RefCell;
use std::io;

/// Scripted [`Runner`]: records command lines, returns a fixed exit code, and writes a canned
/// valgrind report to any `--xml-file=` path it sees.
#[derive(Default)]
pub struct FakeRunner {
    exit_code: i32,
    stdout: String,
    xml: Option<String>,
    fail_spawn: bool,
    commands: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn with_stdout(mut self, stdout: &str) -> Self {
        self.stdout = stdout.to_string();
        self
    }

    pub fn with_valgrind_xml(mut self, xml: &str) -> Self {
        self.xml = Some(xml.to_string());
        self
    }

    pub fn failing_spawn(mut self) -> Self {
        self.fail_spawn = true;
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl Runner for FakeRunner {
    fn run(&self, command: &str, _cwd: &Utf8Path) -> io::Result<Process> {
        self.commands.borrow_mut().push(command.to_string());
        if self.fail_spawn {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
        }

        if let (Some(xml), Some(path)) = (&self.xml, xml_file_arg(command)) {
            std::fs::write(path, xml)?;
        }

        Ok(Process::new(
            command,
            Some(self.exit_code),
            self.stdout.clone(),
            String::new(),
        ))
    }
}

pub fn xml_file_arg(command: &str) -> Option<&str> {
    command
        .split_whitespace()
        .find_map(|arg| arg.strip_prefix("--xml-file="))
}

pub const LEAK_XML: &str = r#"<?xml version="1.0"?>
<valgrindoutput>
  <error>
    <kind>Leak_DefinitelyLost</kind>
    <xwhat><text>40 bytes in 1 blocks are definitely lost in loss record 1 of 1</text></xwhat>
    <stack>
      <frame><obj>/usr/lib/x86_64-linux-gnu/valgrind/vgpreload_memcheck-amd64-linux.so</obj><fn>malloc</fn></frame>
      <frame><obj>{RUN_DIR}/leak</obj><fn>main</fn><file>leak.c</file><line>7</line></frame>
    </stack>
  </error>
</valgrindoutput>
"#;

pub const CLEAN_XML: &str = r#"<?xml version="1.0"?>
<valgrindoutput>
  <status><state>FINISHED</state></status>
  <errorcounts/>
</valgrindoutput>
"#;

/// Fill the `{RUN_DIR}` placeholder.
pub fn with_run_dir(xml: &str, run_dir: &Utf8Path) -> String {
    xml.replace("{RUN_DIR}", run_dir.as_str())
}
