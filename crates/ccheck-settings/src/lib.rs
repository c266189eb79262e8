//! Config parsing and override resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{CcheckConfigV1, SCHEMA_CONFIG_V1};
pub use presets::{DEFAULT_CC, DEFAULT_CFLAGS, DEFAULT_VALGRIND};
pub use resolve::{EffectiveConfig, Overrides, ResolvedConfig};

/// Parse `ccheck.toml` (or equivalent) into a typed model.
///
/// A `schema` key, when present, must name `ccheck.config.v1`.
pub fn parse_config_toml(input: &str) -> anyhow::Result<CcheckConfigV1> {
    let cfg: CcheckConfigV1 = toml::from_str(input)?;
    if let Some(schema) = cfg.schema.as_deref() {
        if schema != SCHEMA_CONFIG_V1 {
            anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
        }
    }
    Ok(cfg)
}

/// Resolve the effective config (built-in defaults + config file + CLI overrides).
pub fn resolve_config(cfg: CcheckConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
