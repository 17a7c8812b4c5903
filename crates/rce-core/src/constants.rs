/// Nodes are evicted once `now - birth` reaches this many milliseconds.
pub const DEFAULT_MAX_NODE_LIFETIME_MS: u64 = 60_000;

/// Edge opacity falls linearly to zero over this many milliseconds.
pub const DEFAULT_EDGE_FADE_WINDOW_MS: u64 = 30_000;

/// Growth-rate distance below which two nodes are always linked.
pub const DEFAULT_RESONANCE_LINK_THRESHOLD: f64 = 0.5;

/// Chance that any evaluated pair is linked regardless of resonance.
pub const DEFAULT_RANDOM_LINK_PROBABILITY: f64 = 0.1;

/// Fallback growth rate for resonance names outside the fixed table (hover).
pub const DEFAULT_GROWTH_RATE: f64 = 2.0;

/// Fallback fade rate for resonance names outside the fixed table (hover).
pub const DEFAULT_FADE_RATE: f64 = 0.004;
