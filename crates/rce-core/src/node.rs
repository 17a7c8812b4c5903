use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::binding::BindingType;
use crate::record::{EventRecord, ResonanceKind};
use crate::time::Timestamp;

/// Identifier of a node. Unique among live nodes only.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// A fresh random id, used when a record arrives without one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One side of an edge. The peer's node holds the mirror entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub peer: NodeId,
    pub binding: BindingType,
    pub formed_at: Timestamp,
}

/// A live glint plus its lifecycle bookkeeping.
///
/// Only the graph creates nodes. `last_interaction` and `interaction_count`
/// change exclusively through [`crate::lifecycle::touch`].
#[derive(Clone, Debug)]
pub struct ConstellationNode {
    id: NodeId,
    glyph: String,
    density: f64,
    resonance_kind: ResonanceKind,
    binding_hint: Option<BindingType>,
    source_timestamp: Option<Timestamp>,
    birth: Timestamp,
    pub(crate) last_interaction: Timestamp,
    pub(crate) interaction_count: u64,
    connections: BTreeMap<NodeId, Connection>,
}

impl ConstellationNode {
    /// Build a node from an already validated record.
    pub(crate) fn new(
        id: NodeId,
        record: EventRecord,
        resonance_kind: ResonanceKind,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            glyph: record.glyph,
            density: crate::record::clamp_density(record.density),
            resonance_kind,
            binding_hint: record.binding_hint,
            source_timestamp: record.timestamp,
            birth: now,
            last_interaction: now,
            interaction_count: 0,
            connections: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn resonance_kind(&self) -> ResonanceKind {
        self.resonance_kind
    }

    pub fn binding_hint(&self) -> Option<BindingType> {
        self.binding_hint
    }

    pub fn source_timestamp(&self) -> Option<Timestamp> {
        self.source_timestamp
    }

    pub fn birth(&self) -> Timestamp {
        self.birth
    }

    pub fn last_interaction(&self) -> Timestamp {
        self.last_interaction
    }

    pub fn interaction_count(&self) -> u64 {
        self.interaction_count
    }

    /// Connections ordered by peer id.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn connection_to(&self, peer: &NodeId) -> Option<&Connection> {
        self.connections.get(peer)
    }

    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    pub(crate) fn connect(&mut self, connection: Connection) {
        self.connections.insert(connection.peer.clone(), connection);
    }

    pub(crate) fn disconnect(&mut self, peer: &NodeId) -> Option<Connection> {
        self.connections.remove(peer)
    }

    pub(crate) fn take_connections(&mut self) -> BTreeMap<NodeId, Connection> {
        std::mem::take(&mut self.connections)
    }
}
