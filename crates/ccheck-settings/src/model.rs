use serde::{Deserialize, Serialize};

/// The only config schema string ccheck understands.
pub const SCHEMA_CONFIG_V1: &str = "ccheck.config.v1";

/// `ccheck.toml` schema v1.
///
/// Every key is optional; anything left out falls back to the built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CcheckConfigV1 {
    /// Optional schema string; must be [`SCHEMA_CONFIG_V1`] when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Compiler executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,

    /// Flags appended after the source file and output flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cflags: Option<String>,

    /// Valgrind executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valgrind: Option<String>,
}
