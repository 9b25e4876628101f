//! Store error types.
//!
//! Mutations validate their IDs before touching any state, so an
//! `UnknownNode`/`UnknownEdge` rejection implies no partial mutation
//! happened. Evaluation failures carry the node being evaluated.

use thiserror::Error;
use valuegraph_core::error::EvalError;
use valuegraph_core::id::{EdgeId, NodeId};

/// Errors produced by [`GraphStore`](crate::store::GraphStore) mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A mutation referenced a node ID not present in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    UnknownNode { id: NodeId },

    /// A mutation referenced a typed-edge ID not present in the graph.
    #[error("edge not found: EdgeId({id})", id = id.0)]
    UnknownEdge { id: EdgeId },

    /// A node label collides with another live node's label, which would
    /// make expression references ambiguous.
    #[error("duplicate label: '{label}'")]
    DuplicateLabel { label: String },

    /// An explicit evaluate step failed. The node's last-known-good value
    /// is left unchanged.
    #[error("evaluation failed at node {node}")]
    Eval {
        node: NodeId,
        source: EvalError,
    },
}
