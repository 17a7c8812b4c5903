//! Age and recency of nodes. Pure functions over timestamps.

use crate::node::ConstellationNode;
use crate::time::Timestamp;

/// Milliseconds since the node was born. 0 if `now` precedes birth.
pub fn age(node: &ConstellationNode, now: Timestamp) -> u64 {
    now.saturating_since(node.birth())
}

/// Milliseconds since the node last took part in a tick or gained an edge.
pub fn idle_time(node: &ConstellationNode, now: Timestamp) -> u64 {
    now.saturating_since(node.last_interaction)
}

/// Record an interaction at `now`.
pub fn touch(node: &mut ConstellationNode, now: Timestamp) {
    node.last_interaction = now;
    node.interaction_count = node.interaction_count.saturating_add(1);
}
