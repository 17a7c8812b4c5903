//! Link decisions between a newly ingested node and the live ones.
//!
//! Whether two nodes link may be stochastic. Which [`BindingType`] a link
//! gets is always a pure function of the pair.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::node::{ConstellationNode, NodeId};

/// Nature of a link between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    Reference,
    Echo,
    Emergence,
}

/// How a renderer should stroke an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindingStyle {
    pub color: &'static str,
    pub dash_pattern: &'static [u8],
}

impl BindingType {
    /// Fixed selection order for [`BindingPolicy::select_binding`].
    pub const ORDER: [BindingType; 3] = [Self::Reference, Self::Echo, Self::Emergence];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Echo => "echo",
            Self::Emergence => "emergence",
        }
    }

    pub fn style(&self) -> BindingStyle {
        match self {
            Self::Reference => BindingStyle {
                color: "#9ad1ff",
                dash_pattern: &[],
            },
            Self::Echo => BindingStyle {
                color: "#ffd27f",
                dash_pattern: &[4, 4],
            },
            Self::Emergence => BindingStyle {
                color: "#c89bff",
                dash_pattern: &[1, 3],
            },
        }
    }
}

impl fmt::Display for BindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resonance and serendipity thresholds for linking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BindingPolicy {
    pub resonance_link_threshold: f64,
    pub random_link_probability: f64,
}

impl BindingPolicy {
    pub fn new(resonance_link_threshold: f64, random_link_probability: f64) -> Self {
        Self {
            resonance_link_threshold,
            random_link_probability,
        }
    }

    /// Absolute difference of the two kinds' growth rates.
    pub fn resonance_distance(candidate: &ConstellationNode, existing: &ConstellationNode) -> f64 {
        let a = candidate.resonance_kind().style().growth_rate;
        let b = existing.resonance_kind().style().growth_rate;
        (a - b).abs()
    }

    /// Decide whether `candidate` links to `existing`, and how.
    ///
    /// The binding is the candidate's hint if it has one, else the existing
    /// node's hint, else [`Self::select_binding`]. With two different hints
    /// the result therefore depends on argument order.
    ///
    /// Exactly one sample is drawn from `rng` per call, whatever the
    /// resonance check says, so the random stream advances identically
    /// for every evaluated pair.
    pub fn evaluate(
        &self,
        candidate: &ConstellationNode,
        existing: &ConstellationNode,
        rng: &mut impl Rng,
    ) -> Option<BindingType> {
        let resonant =
            Self::resonance_distance(candidate, existing) < self.resonance_link_threshold;
        let sample: f64 = rng.random();
        let serendipitous = sample < self.random_link_probability;

        if !(resonant || serendipitous) {
            return None;
        }

        let binding = candidate
            .binding_hint()
            .or(existing.binding_hint())
            .unwrap_or_else(|| Self::select_binding(candidate.id(), existing.id()));
        Some(binding)
    }

    /// Order-independent FNV-1a over the sorted pair of ids.
    pub fn select_binding(a: &NodeId, b: &NodeId) -> BindingType {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        let bytes = lo
            .as_str()
            .bytes()
            .chain(std::iter::once(0u8))
            .chain(hi.as_str().bytes());
        for byte in bytes {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }

        let idx = (hash % BindingType::ORDER.len() as u64) as usize;
        BindingType::ORDER[idx]
    }
}
