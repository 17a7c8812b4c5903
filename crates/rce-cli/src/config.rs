//! Layered engine configuration: defaults, then an optional TOML file,
//! then `RCE_*` environment overrides.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use rce_core::EngineConfig;

pub const CONFIG_ENV: &str = "RCE_CONFIG";

/// Resolve the config file: explicit flag > RCE_CONFIG env > none (defaults).
pub fn resolve_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| env::var(CONFIG_ENV).ok().map(PathBuf::from))
}

pub fn load(flag: Option<&Path>) -> Result<EngineConfig> {
    let mut config = match resolve_path(flag) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let parsed: EngineConfig = toml::from_str(&content)
                .with_context(|| format!("failed to parse config {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parsed
        }
        None => EngineConfig::default(),
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

/// Apply `RCE_*` overrides through `lookup`, so tests need not touch the
/// process environment.
pub fn apply_env_overrides(
    config: &mut EngineConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(v) = lookup("RCE_MAX_NODE_LIFETIME_MS") {
        config.max_node_lifetime_ms = parse_var("RCE_MAX_NODE_LIFETIME_MS", &v)?;
    }
    if let Some(v) = lookup("RCE_EDGE_FADE_WINDOW_MS") {
        config.edge_fade_window_ms = parse_var("RCE_EDGE_FADE_WINDOW_MS", &v)?;
    }
    if let Some(v) = lookup("RCE_RESONANCE_LINK_THRESHOLD") {
        config.resonance_link_threshold = parse_var("RCE_RESONANCE_LINK_THRESHOLD", &v)?;
    }
    if let Some(v) = lookup("RCE_RANDOM_LINK_PROBABILITY") {
        config.random_link_probability = parse_var("RCE_RANDOM_LINK_PROBABILITY", &v)?;
    }
    Ok(())
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {key}: {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_no_overrides() {
        let mut cfg = EngineConfig::default();
        apply_env_overrides(&mut cfg, lookup(&[])).unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn test_overrides_applied() {
        let mut cfg = EngineConfig::default();
        apply_env_overrides(
            &mut cfg,
            lookup(&[
                ("RCE_MAX_NODE_LIFETIME_MS", "1500"),
                ("RCE_RANDOM_LINK_PROBABILITY", " 0.25 "),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.max_node_lifetime_ms, 1_500);
        assert_eq!(cfg.random_link_probability, 0.25);
        assert_eq!(cfg.edge_fade_window_ms, 30_000);
    }

    #[test]
    fn test_bad_override_names_variable() {
        let mut cfg = EngineConfig::default();
        let err = apply_env_overrides(&mut cfg, lookup(&[("RCE_EDGE_FADE_WINDOW_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("RCE_EDGE_FADE_WINDOW_MS"), "{err}");
    }

    #[test]
    fn test_toml_partial_file() {
        let cfg: EngineConfig = toml::from_str("resonance_link_threshold = 0.2\n").unwrap();
        assert_eq!(cfg.resonance_link_threshold, 0.2);
        assert_eq!(cfg.max_node_lifetime_ms, 60_000);
    }
}
