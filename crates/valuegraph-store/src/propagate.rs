//! Generational propagation over derived edges (expression mode).
//!
//! Where typed-mode propagation charges arbitrary node sets, the
//! expression-mode analogue walks "downstream" as defined by the derived
//! edge set, one generation per step: direct children, then grandchildren,
//! and so on. When a generation yields no further descendants the
//! propagator wraps around -- depth resets to 0 and the frontier re-targets
//! the original root. The wrap-around is intentional behavior, letting the
//! surrounding application loop a highlight animation from the source.

use indexmap::IndexSet;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use valuegraph_core::edge::DerivedEdge;
use valuegraph_core::id::NodeId;

use crate::event::StoreEvent;

/// Steps a breadth-first frontier through the derived dependency graph.
#[derive(Debug, Clone)]
pub struct DepthPropagator {
    root: NodeId,
    depth: u32,
    frontier: Vec<NodeId>,
}

impl DepthPropagator {
    /// Targets `root` at depth 0.
    pub fn new(root: NodeId) -> Self {
        DepthPropagator {
            root,
            depth: 0,
            frontier: vec![root],
        }
    }

    /// The originating node; the frontier returns here on wrap-around.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current generational depth (edge-hops from the root).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The nodes at the current generational depth, first-seen order.
    pub fn frontier(&self) -> &[NodeId] {
        &self.frontier
    }

    /// Advances one generation along `edges`.
    ///
    /// The next frontier is the de-duplicated set of direct successors of
    /// the current one. An empty next generation resets depth to 0 and
    /// re-targets the root.
    pub fn step(&mut self, edges: &[DerivedEdge]) -> StoreEvent {
        let mut graph: DiGraphMap<NodeId, ()> = DiGraphMap::new();
        for edge in edges {
            graph.add_edge(edge.source, edge.target, ());
        }

        let mut next: IndexSet<NodeId> = IndexSet::new();
        for id in &self.frontier {
            if !graph.contains_node(*id) {
                continue;
            }
            for successor in graph.neighbors_directed(*id, Direction::Outgoing) {
                next.insert(successor);
            }
        }

        if next.is_empty() {
            self.depth = 0;
            self.frontier = vec![self.root];
        } else {
            self.depth += 1;
            self.frontier = next.into_iter().collect();
        }

        StoreEvent::PropagationFrontier {
            depth: self.depth,
            nodes: self.frontier.clone(),
        }
    }
}
