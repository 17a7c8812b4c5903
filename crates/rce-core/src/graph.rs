use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::binding::{BindingPolicy, BindingType};
use crate::config::EngineConfig;
use crate::decay::DecayModel;
use crate::error::{ConfigError, EngineError, Result};
use crate::lifecycle;
use crate::node::{ConstellationNode, Connection, NodeId};
use crate::record::{EventRecord, ResonanceKind};
use crate::snapshot::{EdgeSnapshot, NodeSnapshot, Snapshot};
use crate::time::Timestamp;

/// Sole owner of every live node and edge.
///
/// Edges live as mirrored [`Connection`] entries on both endpoints. All
/// mutation goes through `ingest`, `tick` and `evict`; each either completes
/// or leaves the graph untouched. The graph is not synchronized: a
/// multi-threaded host must put it behind a single owner.
pub struct ConstellationGraph<R: Rng = SmallRng> {
    config: EngineConfig,
    policy: BindingPolicy,
    decay: DecayModel,
    nodes: BTreeMap<NodeId, ConstellationNode>,
    last_tick: Option<Timestamp>,
    rng: R,
}

impl ConstellationGraph<SmallRng> {
    /// Graph with an OS-seeded random source.
    pub fn new(config: EngineConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// Graph with a reproducible random source.
    pub fn seeded(config: EngineConfig, seed: u64) -> std::result::Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ConstellationGraph<R> {
    /// Graph drawing serendipitous-link samples from `rng`.
    pub fn with_rng(config: EngineConfig, rng: R) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            policy: config.binding_policy(),
            decay: config.decay_model(),
            nodes: BTreeMap::new(),
            last_tick: None,
            rng,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&ConstellationNode> {
        self.nodes.get(id)
    }

    /// Live nodes ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &ConstellationNode> {
        self.nodes.values()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.degree()).sum::<usize>() / 2
    }

    /// `now` of the most recent successful tick.
    pub fn last_tick(&self) -> Option<Timestamp> {
        self.last_tick
    }

    /// Add a glint born at `now` and link it against every live node.
    ///
    /// Links only ever look backwards: the new node sees the graph as it is
    /// at this call, and earlier nodes never evaluate against it later.
    /// Nodes whose age at `now` has reached the lifetime are skipped.
    pub fn ingest(&mut self, record: EventRecord, now: Timestamp) -> Result<NodeId> {
        let kind = ResonanceKind::parse(&record.resonance_kind).ok_or_else(|| {
            EngineError::InvalidResonanceKind {
                kind: record.resonance_kind.clone(),
            }
        })?;

        let id = match record.id.as_deref() {
            Some(raw) => NodeId::new(raw),
            None => NodeId::generate(),
        };
        if self.nodes.contains_key(&id) {
            return Err(EngineError::DuplicateNodeId(id));
        }

        let mut node = ConstellationNode::new(id.clone(), record, kind, now);

        // Nodes past their lifetime are dead even before a tick evicts them.
        let lifetime = self.config.max_node_lifetime_ms;
        let links: Vec<(NodeId, BindingType)> = self
            .nodes
            .values()
            .filter(|existing| lifecycle::age(existing, now) < lifetime)
            .filter_map(|existing| {
                self.policy
                    .evaluate(&node, existing, &mut self.rng)
                    .map(|binding| (existing.id().clone(), binding))
            })
            .collect();

        for (peer_id, binding) in &links {
            let Some(peer) = self.nodes.get_mut(peer_id) else {
                continue;
            };
            peer.connect(Connection {
                peer: id.clone(),
                binding: *binding,
                formed_at: now,
            });
            lifecycle::touch(peer, now);

            node.connect(Connection {
                peer: peer_id.clone(),
                binding: *binding,
                formed_at: now,
            });
            lifecycle::touch(&mut node, now);
            tracing::trace!(a = %id, b = %peer_id, %binding, "linked");
        }

        tracing::debug!(id = %id, kind = %kind, links = links.len(), "ingested glint");
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Advance to `now`: touch every node, evict the expired, snapshot the rest.
    ///
    /// Fails with [`EngineError::NonMonotonicTick`] without mutating anything
    /// when `now` is earlier than the previous tick. Re-ticking the same
    /// `now` evicts nothing new but still counts as an interaction.
    pub fn tick(&mut self, now: Timestamp) -> Result<Snapshot> {
        if let Some(previous) = self.last_tick
            && now < previous
        {
            return Err(EngineError::NonMonotonicTick {
                previous,
                requested: now,
            });
        }
        self.last_tick = Some(now);

        for node in self.nodes.values_mut() {
            lifecycle::touch(node, now);
        }

        let lifetime = self.config.max_node_lifetime_ms;
        let expired: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|n| lifecycle::age(n, now) >= lifetime)
            .map(|n| n.id().clone())
            .collect();
        for id in &expired {
            self.remove(id);
        }
        if !expired.is_empty() {
            tracing::debug!(evicted = expired.len(), live = self.nodes.len(), at = %now, "evicted expired nodes");
        }

        Ok(self.view(now))
    }

    /// Remove a node by hand. `false` if it was not live.
    pub fn evict(&mut self, id: &NodeId) -> bool {
        let removed = self.remove(id);
        if removed {
            tracing::debug!(id = %id, "evicted node");
        }
        removed
    }

    /// Snapshot at `now` without touching nodes or advancing the tick clock.
    pub fn view(&self, now: Timestamp) -> Snapshot {
        let mut nodes: Vec<NodeSnapshot> = self
            .nodes
            .values()
            .map(|n| NodeSnapshot {
                id: n.id().clone(),
                glyph: n.glyph().to_string(),
                resonance_kind: n.resonance_kind(),
                density: n.density(),
                birth: n.birth(),
                source_timestamp: n.source_timestamp(),
                age_ms: lifecycle::age(n, now),
                idle_ms: lifecycle::idle_time(n, now),
                interaction_count: n.interaction_count(),
                strength: self.decay.node_strength(n, now),
            })
            .collect();
        nodes.sort_by(|x, y| x.birth.cmp(&y.birth).then_with(|| x.id.cmp(&y.id)));

        // BTreeMap order on both levels yields edges already sorted by (a, b).
        let edges = self
            .nodes
            .values()
            .flat_map(|n| {
                n.connections()
                    .filter(move |c| n.id() < &c.peer)
                    .map(move |c| EdgeSnapshot {
                        a: n.id().clone(),
                        b: c.peer.clone(),
                        binding: c.binding,
                        formed_at: c.formed_at,
                        opacity: self.decay.edge_opacity(c.formed_at, now),
                    })
            })
            .collect();

        Snapshot {
            at: now,
            nodes,
            edges,
        }
    }

    /// Drop a node and strip its mirror entries from every former peer.
    fn remove(&mut self, id: &NodeId) -> bool {
        let Some(mut node) = self.nodes.remove(id) else {
            return false;
        };
        for peer_id in node.take_connections().into_keys() {
            if let Some(peer) = self.nodes.get_mut(&peer_id) {
                peer.disconnect(id);
            }
        }
        true
    }
}
