/// Compiler used when neither the config nor the CLI names one.
pub const DEFAULT_CC: &str = "clang";

/// Flags used when neither the config nor the CLI provides any.
pub const DEFAULT_CFLAGS: &str = "-std=c11 -ggdb3 -lcs50 -lm";

pub const DEFAULT_VALGRIND: &str = "valgrind";
