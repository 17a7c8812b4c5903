use serde::{Deserialize, Serialize};

use crate::binding::BindingType;
use crate::node::NodeId;
use crate::record::ResonanceKind;
use crate::time::Timestamp;

/// One live node as seen by a renderer at snapshot time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub glyph: String,
    pub resonance_kind: ResonanceKind,
    pub density: f64,
    pub birth: Timestamp,
    /// The source's own clock reading, if the record carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_timestamp: Option<Timestamp>,
    pub age_ms: u64,
    pub idle_ms: u64,
    pub interaction_count: u64,
    pub strength: f64,
}

/// One live edge. Endpoints are ordered so that `a < b`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub a: NodeId,
    pub b: NodeId,
    pub binding: BindingType,
    pub formed_at: Timestamp,
    pub opacity: f64,
}

/// Point-in-time copy of the constellation. Never updated after it is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub at: Timestamp,
    /// Ordered by birth, then id.
    pub nodes: Vec<NodeSnapshot>,
    /// Ordered by `(a, b)`.
    pub edges: Vec<EdgeSnapshot>,
}

impl Snapshot {
    pub fn node(&self, id: &NodeId) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// The edge between two nodes, in either argument order.
    pub fn edge_between(&self, x: &NodeId, y: &NodeId) -> Option<&EdgeSnapshot> {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        self.edges.iter().find(|e| &e.a == a && &e.b == b)
    }

    /// Edges with at least one endpoint equal to `id`.
    pub fn edges_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a EdgeSnapshot> + 'a {
        self.edges.iter().filter(move |e| &e.a == id || &e.b == id)
    }
}
