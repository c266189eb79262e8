//! Command lines for the compiler and for running a program under valgrind.

/// Suffix stripped from a source file name to get the default executable name.
pub const C_SOURCE_SUFFIX: &str = ".c";

/// Arguments of a single compile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileRequest<'a> {
    pub file_name: &'a str,
    pub exe_name: Option<&'a str>,
    pub compiler: &'a str,
    pub flags: &'a str,
}

impl CompileRequest<'_> {
    /// Output name: the explicit one, else the source name minus `.c`.
    pub fn output_name(&self) -> Option<String> {
        match self.exe_name {
            Some(name) => Some(name.to_string()),
            None => default_exe_name(self.file_name),
        }
    }

    /// `{compiler} {file_name} -o {exe_name} {flags}`, with empty parts left out.
    pub fn command_line(&self) -> String {
        let out_flag = self
            .output_name()
            .map(|name| format!("-o {name}"))
            .unwrap_or_default();
        join_segments(&[self.compiler, self.file_name, &out_flag, self.flags])
    }
}

/// `hello.c` -> `hello`. Names without the `.c` suffix have no default.
pub fn default_exe_name(file_name: &str) -> Option<String> {
    file_name
        .strip_suffix(C_SOURCE_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Wrap `command` so valgrind reports every leak kind as XML into `xml_file`.
pub fn valgrind_command_line(valgrind: &str, xml_file: &str, command: &str) -> String {
    join_segments(&[
        valgrind,
        "--show-leak-kinds=all",
        "--xml=yes",
        &format!("--xml-file={xml_file}"),
        "--",
        command,
    ])
}

fn join_segments(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
