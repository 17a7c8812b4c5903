//! Time-to-opacity mappings shared by the graph and by renderers.
//!
//! Everything here is a pure function of its arguments. Node strength and
//! edge opacity both fade linearly and clamp to [0, 1].

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FADE_RATE, DEFAULT_GROWTH_RATE};
use crate::lifecycle;
use crate::node::ConstellationNode;
use crate::record::ResonanceKind;
use crate::time::Timestamp;

/// Per-kind animation rates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResonanceStyle {
    pub growth_rate: f64,
    pub fade_rate: f64,
}

impl ResonanceStyle {
    pub const DEFAULT: Self = Self {
        growth_rate: DEFAULT_GROWTH_RATE,
        fade_rate: DEFAULT_FADE_RATE,
    };
}

impl ResonanceKind {
    pub fn style(&self) -> ResonanceStyle {
        let (growth_rate, fade_rate) = match self {
            Self::Absence => (0.5, 0.008),
            Self::Drift => (1.8, 0.005),
            Self::Hover => (DEFAULT_GROWTH_RATE, DEFAULT_FADE_RATE),
            Self::Pause => (1.0, 0.006),
            Self::Presence => (3.0, 0.002),
        };
        ResonanceStyle {
            growth_rate,
            fade_rate,
        }
    }
}

/// Style lookup by name. Unknown names get the hover rates.
pub fn style_for(resonance_kind: &str) -> ResonanceStyle {
    ResonanceKind::parse(resonance_kind)
        .map(|k| k.style())
        .unwrap_or(ResonanceStyle::DEFAULT)
}

/// Linear fade parameters, fixed at graph construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecayModel {
    pub max_node_lifetime_ms: u64,
    pub edge_fade_window_ms: u64,
}

impl DecayModel {
    pub fn new(max_node_lifetime_ms: u64, edge_fade_window_ms: u64) -> Self {
        Self {
            max_node_lifetime_ms,
            edge_fade_window_ms,
        }
    }

    /// 1 at birth, 0 at the eviction boundary.
    pub fn node_strength(&self, node: &ConstellationNode, now: Timestamp) -> f64 {
        linear_fade(lifecycle::age(node, now), self.max_node_lifetime_ms)
    }

    /// 1 when the edge forms, 0 once the fade window has passed.
    pub fn edge_opacity(&self, edge_formed_at: Timestamp, now: Timestamp) -> f64 {
        linear_fade(now.saturating_since(edge_formed_at), self.edge_fade_window_ms)
    }
}

fn linear_fade(elapsed_ms: u64, window_ms: u64) -> f64 {
    if window_ms == 0 {
        return 0.0;
    }
    (1.0 - elapsed_ms as f64 / window_ms as f64).clamp(0.0, 1.0)
}
