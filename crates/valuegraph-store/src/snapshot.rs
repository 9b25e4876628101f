//! Snapshot serialization contract.
//!
//! [`GraphSnapshot`] is the structured textual export shape collaborators
//! use for file export/import. It round-trips unchanged in meaning: numeric
//! and string fields exactly, floating-point positions at full precision
//! (serde_json emits the shortest representation that parses back to the
//! same f64). The impulse set is process-scoped and not part of the
//! snapshot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use valuegraph_core::edge::{DerivedEdge, TypedEdge};
use valuegraph_core::id::{EdgeId, NodeId};
use valuegraph_core::node::Node;

use crate::store::GraphStore;

/// A full dump of the graph state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes in creation order.
    pub nodes: Vec<Node>,
    /// The derived edge set at snapshot time. Informational for consumers;
    /// restore recomputes it from the expressions.
    pub derived_edges: Vec<DerivedEdge>,
    /// Typed edges in creation order.
    pub typed_edges: Vec<TypedEdge>,
    /// ID counters, preserved so a restored session never reuses an id.
    pub next_node_id: u64,
    pub next_edge_id: u64,
}

impl GraphSnapshot {
    /// Serializes the snapshot to JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl GraphStore {
    /// Captures the current graph state.
    pub fn snapshot(&self) -> GraphSnapshot {
        let (next_node_id, next_edge_id) = self.counters();
        GraphSnapshot {
            nodes: self.node_table().values().cloned().collect(),
            derived_edges: self.derived_edges().to_vec(),
            typed_edges: self.typed_table().values().copied().collect(),
            next_node_id,
            next_edge_id,
        }
    }

    /// Rebuilds a store from a snapshot. Derived edges are recomputed from
    /// the restored expressions; selection and impulses start cleared.
    pub fn restore(snapshot: GraphSnapshot) -> Self {
        let nodes: IndexMap<NodeId, Node> =
            snapshot.nodes.into_iter().map(|n| (n.id, n)).collect();
        let typed: IndexMap<EdgeId, TypedEdge> =
            snapshot.typed_edges.into_iter().map(|e| (e.id, e)).collect();
        GraphStore::from_parts(nodes, typed, snapshot.next_node_id, snapshot.next_edge_id)
    }
}
