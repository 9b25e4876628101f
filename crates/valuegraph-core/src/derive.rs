//! Edge derivation: rebuilding the dependency edge set from expressions.
//!
//! Derived edges are a cache, not user data. The specified update strategy
//! is recomputation from scratch after every mutation -- acceptable for the
//! graph sizes this core targets, and it keeps the idempotence property
//! trivial to uphold.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::edge::DerivedEdge;
use crate::expr::extract_references;
use crate::id::NodeId;
use crate::node::Node;

/// Rebuilds the complete derived edge set for the given node table.
///
/// For every node, every resolvable label reference in its expression emits
/// one edge from the referenced node to the scanning node. Unresolvable
/// references are skipped silently -- a user may be mid-edit of a label.
/// Repeated references to the same label collapse to the single (source,
/// target) pair that is the edge's identity. Total and idempotent.
pub fn derive_edges(nodes: &IndexMap<NodeId, Node>) -> Vec<DerivedEdge> {
    let mut edges = Vec::new();
    let mut seen: HashSet<DerivedEdge> = HashSet::new();
    for node in nodes.values() {
        for reference in extract_references(&node.expression) {
            let Some(source) = nodes.values().find(|n| n.label == reference) else {
                continue;
            };
            let edge = DerivedEdge {
                source: source.id,
                target: node.id,
            };
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }
    edges
}
