use std::fmt;

use crate::node::NodeId;
use crate::time::Timestamp;

/// Failures of a single engine call. None of them leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The record's resonance kind is not one of the fixed set.
    InvalidResonanceKind { kind: String },
    /// `tick` was called with a `now` earlier than the previous tick.
    NonMonotonicTick {
        previous: Timestamp,
        requested: Timestamp,
    },
    /// The record's id is already held by a live node.
    DuplicateNodeId(NodeId),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidResonanceKind { kind } => {
                write!(f, "invalid resonance kind: {kind:?}")
            }
            EngineError::NonMonotonicTick {
                previous,
                requested,
            } => write!(
                f,
                "non-monotonic tick: requested {requested} after {previous}"
            ),
            EngineError::DuplicateNodeId(id) => write!(f, "node id already live: {id}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Rejected engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config value for {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = EngineError::InvalidResonanceKind {
            kind: "nonexistent".to_string(),
        };
        assert_eq!(e.to_string(), "invalid resonance kind: \"nonexistent\"");

        let e = EngineError::NonMonotonicTick {
            previous: Timestamp::from_millis(10),
            requested: Timestamp::from_millis(5),
        };
        assert_eq!(e.to_string(), "non-monotonic tick: requested 5ms after 10ms");

        let e = ConfigError::Invalid {
            field: "random_link_probability",
            reason: "must be within [0, 1]".to_string(),
        };
        assert!(e.to_string().contains("random_link_probability"));
    }
}
