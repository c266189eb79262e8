use crate::{model::CcheckConfigV1, presets};

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub cc: Option<String>,
    pub cflags: Option<String>,
    pub valgrind: Option<String>,
}

/// The tool settings every check runs with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub cc: String,
    pub cflags: String,
    pub valgrind: String,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            cc: presets::DEFAULT_CC.to_string(),
            cflags: presets::DEFAULT_CFLAGS.to_string(),
            valgrind: presets::DEFAULT_VALGRIND.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: CcheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut effective = EffectiveConfig::default();

    if let Some(cc) = overrides.cc.or(cfg.cc) {
        effective.cc = cc;
    }
    if let Some(cflags) = overrides.cflags.or(cfg.cflags) {
        effective.cflags = cflags;
    }
    if let Some(valgrind) = overrides.valgrind.or(cfg.valgrind) {
        effective.valgrind = valgrind;
    }

    if effective.cc.trim().is_empty() {
        anyhow::bail!("compiler must not be empty");
    }
    if effective.valgrind.trim().is_empty() {
        anyhow::bail!("valgrind executable must not be empty");
    }

    Ok(ResolvedConfig { effective })
}
