use std::fmt;

use serde::{Deserialize, Serialize};

use crate::binding::BindingType;
use crate::time::Timestamp;

/// Category of a glint. Determines decay rates and binding affinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResonanceKind {
    Absence,
    Drift,
    Hover,
    Pause,
    Presence,
}

impl ResonanceKind {
    pub const ALL: [ResonanceKind; 5] = [
        Self::Absence,
        Self::Drift,
        Self::Hover,
        Self::Pause,
        Self::Presence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absence => "absence",
            Self::Drift => "drift",
            Self::Hover => "hover",
            Self::Pause => "pause",
            Self::Presence => "presence",
        }
    }

    /// Case-insensitive parse. `None` for anything outside the fixed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absence" => Some(Self::Absence),
            "drift" => Some(Self::Drift),
            "hover" => Some(Self::Hover),
            "pause" => Some(Self::Pause),
            "presence" => Some(Self::Presence),
            _ => None,
        }
    }
}

impl fmt::Display for ResonanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A glint as delivered by a transport, before validation.
///
/// `resonance_kind` stays a raw string here so that an unknown kind can be
/// rejected by `ConstellationGraph::ingest` rather than by the decoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub glyph: String,
    #[serde(default)]
    pub density: f64,
    pub resonance_kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_hint: Option<BindingType>,
    /// The source's own clock reading, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl EventRecord {
    pub fn new(glyph: &str, resonance_kind: &str) -> Self {
        Self {
            id: None,
            glyph: glyph.to_string(),
            density: 0.0,
            resonance_kind: resonance_kind.to_string(),
            binding_hint: None,
            timestamp: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_binding_hint(mut self, hint: BindingType) -> Self {
        self.binding_hint = Some(hint);
        self
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Density clamped into [0, 1]. NaN maps to 0.
pub(crate) fn clamp_density(density: f64) -> f64 {
    if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    }
}
