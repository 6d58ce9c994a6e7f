//! Inter-satellite link mesh and lowest-latency routing.

mod dijkstra;
mod error;

pub use dijkstra::Route;
pub use error::MeshError;

use crate::Id;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use qtty::{Quantity, Second, Unit};
use std::collections::HashMap;

/// Directed mesh of satellites connected by weighted inter-satellite links.
///
/// Edge weights are link latencies and must be non-negative; routing
/// operations reject meshes that violate this. An undirected link is
/// modeled as two symmetric directed edges via
/// [`add_duplex_isl`](Self::add_duplex_isl). Satellites that appear only
/// as link targets are legal leaves with no outgoing links.
#[derive(Debug, Clone)]
pub struct IslMesh<U: Unit = Second> {
    graph: StableGraph<Id, Quantity<U>, Directed>,
    node_by_id: HashMap<Id, NodeIndex>,
}

impl<U: Unit> Default for IslMesh<U> {
    fn default() -> Self {
        Self {
            graph: StableGraph::default(),
            node_by_id: HashMap::new(),
        }
    }
}

impl<U: Unit> IslMesh<U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a satellite node, returning the id that was used.
    ///
    /// Adding an id that is already present is a no-op.
    pub fn add_satellite(&mut self, id: impl Into<Id>) -> Id {
        let id: Id = id.into();
        self.intern(&id);
        id
    }

    /// Adds a satellite with an auto-generated unique id.
    pub fn add_anonymous_satellite(&mut self) -> Id {
        self.add_satellite(crate::generate_id())
    }

    fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&node) = self.node_by_id.get(id) {
            return node;
        }
        let node = self.graph.add_node(id.to_owned());
        self.node_by_id.insert(id.to_owned(), node);
        node
    }

    /// Adds a directed link `from -> to` with the given latency.
    ///
    /// Unknown endpoints are inserted automatically. A second call for the
    /// same pair replaces the previous latency.
    pub fn add_isl(&mut self, from: impl Into<Id>, to: impl Into<Id>, latency: Quantity<U>) {
        let from = self.intern(&from.into());
        let to = self.intern(&to.into());
        self.graph.update_edge(from, to, latency);
    }

    /// Adds a bidirectional link as two symmetric directed edges.
    pub fn add_duplex_isl(&mut self, a: impl Into<Id>, b: impl Into<Id>, latency: Quantity<U>) {
        let a: Id = a.into();
        let b: Id = b.into();
        self.add_isl(a.clone(), b.clone(), latency);
        self.add_isl(b, a, latency);
    }

    /// Returns true if the satellite is part of the mesh.
    pub fn contains(&self, id: &str) -> bool {
        self.node_by_id.contains_key(id)
    }

    pub fn satellite_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all satellite ids in the mesh.
    pub fn satellites(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(|id| id.as_str())
    }

    /// Returns the latency of the directed link `from -> to`, if present.
    pub fn link_latency(&self, from: &str, to: &str) -> Option<Quantity<U>> {
        let from = *self.node_by_id.get(from)?;
        let to = *self.node_by_id.get(to)?;
        let edge = self.graph.find_edge(from, to)?;
        self.graph.edge_weight(edge).copied()
    }

    pub(crate) fn node_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_by_id.get(id).copied()
    }

    pub(crate) fn id_of(&self, node: NodeIndex) -> &Id {
        &self.graph[node]
    }

    pub(crate) fn graph(&self) -> &StableGraph<Id, Quantity<U>, Directed> {
        &self.graph
    }

    /// Checks every link for a negative (or NaN) latency.
    ///
    /// Dijkstra's optimality argument needs non-negative weights, so both
    /// routing entry points call this before relaxing anything.
    pub(crate) fn ensure_latencies_valid(&self) -> Result<(), MeshError> {
        for node in self.graph.node_indices() {
            for edge in self.graph.edges(node) {
                let latency = edge.weight().value();
                if latency < 0.0 || latency.is_nan() {
                    return Err(MeshError::NegativeLatency {
                        from: self.graph[node].clone(),
                        to: self.graph[edge.target()].clone(),
                        latency,
                    });
                }
            }
        }
        Ok(())
    }
}
