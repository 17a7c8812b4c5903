use serde::{Deserialize, Serialize};

use crate::binding::BindingPolicy;
use crate::constants::{
    DEFAULT_EDGE_FADE_WINDOW_MS, DEFAULT_MAX_NODE_LIFETIME_MS, DEFAULT_RANDOM_LINK_PROBABILITY,
    DEFAULT_RESONANCE_LINK_THRESHOLD,
};
use crate::decay::DecayModel;
use crate::error::ConfigError;

/// Constructor-time parameters of a [`crate::ConstellationGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_node_lifetime_ms: u64,
    pub edge_fade_window_ms: u64,
    pub resonance_link_threshold: f64,
    pub random_link_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_node_lifetime_ms: DEFAULT_MAX_NODE_LIFETIME_MS,
            edge_fade_window_ms: DEFAULT_EDGE_FADE_WINDOW_MS,
            resonance_link_threshold: DEFAULT_RESONANCE_LINK_THRESHOLD,
            random_link_probability: DEFAULT_RANDOM_LINK_PROBABILITY,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_node_lifetime_ms == 0 {
            return Err(invalid("max_node_lifetime_ms", "must be greater than zero"));
        }
        if self.edge_fade_window_ms == 0 {
            return Err(invalid("edge_fade_window_ms", "must be greater than zero"));
        }
        if !self.resonance_link_threshold.is_finite() || self.resonance_link_threshold < 0.0 {
            return Err(invalid(
                "resonance_link_threshold",
                "must be a finite, non-negative number",
            ));
        }
        if !(0.0..=1.0).contains(&self.random_link_probability) {
            return Err(invalid("random_link_probability", "must be within [0, 1]"));
        }
        Ok(())
    }

    pub fn decay_model(&self) -> DecayModel {
        DecayModel::new(self.max_node_lifetime_ms, self.edge_fade_window_ms)
    }

    pub fn binding_policy(&self) -> BindingPolicy {
        BindingPolicy::new(self.resonance_link_threshold, self.random_link_probability)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.max_node_lifetime_ms, 60_000);
        assert_eq!(cfg.edge_fade_window_ms, 30_000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_lifetime() {
        let cfg = EngineConfig {
            max_node_lifetime_ms: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid {
                field: "max_node_lifetime_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        for p in [-0.1, 1.5, f64::NAN] {
            let cfg = EngineConfig {
                random_link_probability: p,
                ..EngineConfig::default()
            };
            assert!(cfg.validate().is_err(), "probability {p} should be rejected");
        }
    }

    #[test]
    fn test_rejects_bad_threshold() {
        for t in [-1.0, f64::INFINITY, f64::NAN] {
            let cfg = EngineConfig {
                resonance_link_threshold: t,
                ..EngineConfig::default()
            };
            assert!(cfg.validate().is_err(), "threshold {t} should be rejected");
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"max_node_lifetime_ms": 5000}"#).unwrap();
        assert_eq!(cfg.max_node_lifetime_ms, 5_000);
        assert_eq!(cfg.edge_fade_window_ms, 30_000);
    }
}
