//! Resonance constellation engine.
//!
//! A streaming in-memory graph of short-lived event records ("glints").
//! Each ingested glint becomes a node, links to resonant live nodes (plus the
//! occasional serendipitous one), fades linearly and is evicted once it
//! outlives `max_node_lifetime_ms`, taking its edges with it.
//!
//! Zero I/O. Callers supply every timestamp, and randomness comes from an
//! injected `rand::Rng`.

pub mod binding;
pub mod config;
pub mod constants;
pub mod decay;
pub mod error;
pub mod graph;
pub mod lifecycle;
pub mod node;
pub mod record;
pub mod snapshot;
pub mod time;

pub use binding::{BindingPolicy, BindingStyle, BindingType};
pub use config::EngineConfig;
pub use constants::{
    DEFAULT_EDGE_FADE_WINDOW_MS, DEFAULT_MAX_NODE_LIFETIME_MS, DEFAULT_RANDOM_LINK_PROBABILITY,
    DEFAULT_RESONANCE_LINK_THRESHOLD,
};
pub use decay::{DecayModel, ResonanceStyle, style_for};
pub use error::{ConfigError, EngineError, Result};
pub use graph::ConstellationGraph;
pub use node::{Connection, ConstellationNode, NodeId};
pub use record::{EventRecord, ResonanceKind};
pub use snapshot::{EdgeSnapshot, NodeSnapshot, Snapshot};
pub use time::Timestamp;
