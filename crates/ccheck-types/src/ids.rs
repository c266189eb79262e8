//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_C_COMPILE: &str = "c.compile";
pub const CHECK_C_VALGRIND: &str = "c.valgrind";
pub const CHECK_C_EXIT: &str = "c.exit";

// Codes: c.compile
pub const CODE_COMPILE_FAILED: &str = "compile_failed";

// Codes: c.valgrind
pub const CODE_MEMORY_ERROR: &str = "memory_error";
pub const CODE_MEMORY_LEAK: &str = "memory_leak";

// Codes: c.exit
pub const CODE_EXIT_MISMATCH: &str = "exit_mismatch";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
