//! Structured event records returned by mutations.
//!
//! Every mutating store operation returns the events it produced, e.g. a
//! rename yields `` `2`: `rate` -> `monthly rate` `` plus one
//! `ExpressionRewritten` per dependent whose expression was updated. Events
//! are serializable so collaborators can log or replay them.

use std::fmt;

use serde::{Deserialize, Serialize};
use valuegraph_core::error::EvalError;
use valuegraph_core::id::{EdgeId, NodeId};

/// A log/event record emitted by a store mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreEvent {
    /// A node was created.
    NodeCreated { node: NodeId, label: String },
    /// A node was deleted (cascading edge removal is reported separately).
    NodeDeleted { node: NodeId, label: String },
    /// A node's label changed.
    LabelRenamed {
        node: NodeId,
        old: String,
        new: String,
    },
    /// A node's expression text changed, either by direct edit or by a
    /// rename rewriting a reference.
    ExpressionRewritten {
        node: NodeId,
        old: String,
        new: String,
    },
    /// A node's stored value changed.
    ValueChanged { node: NodeId, old: f64, new: f64 },
    /// An evaluation failed; the node keeps its last-known-good value.
    EvaluationFailed { node: NodeId, error: EvalError },
    /// A typed edge was created.
    EdgeCreated {
        edge: EdgeId,
        source: NodeId,
        target: NodeId,
    },
    /// A typed edge's kind changed.
    EdgeUpdated { edge: EdgeId },
    /// A typed edge was deleted.
    EdgeDeleted { edge: EdgeId },
    /// One typed edge applied its delta to its target during a propagation
    /// step.
    ImpulseApplied {
        edge: EdgeId,
        target: NodeId,
        delta: f64,
    },
    /// The generational propagation frontier advanced (or wrapped back to
    /// the root).
    PropagationFrontier { depth: u32, nodes: Vec<NodeId> },
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreEvent::NodeCreated { node, label } => {
                write!(f, "created node {} `{}`", node, label)
            }
            StoreEvent::NodeDeleted { node, label } => {
                write!(f, "deleted node {} `{}`", node, label)
            }
            StoreEvent::LabelRenamed { node, old, new } => {
                write!(f, "`{}`: `{}` -> `{}`", node, old, new)
            }
            StoreEvent::ExpressionRewritten { node, old, new } => {
                write!(f, "node {} expression `{}` -> `{}`", node, old, new)
            }
            StoreEvent::ValueChanged { node, old, new } => {
                write!(f, "node {} value {} -> {}", node, old, new)
            }
            StoreEvent::EvaluationFailed { node, error } => {
                write!(f, "node {} evaluation failed: {}", node, error)
            }
            StoreEvent::EdgeCreated {
                edge,
                source,
                target,
            } => write!(f, "created edge {} ({} -> {})", edge, source, target),
            StoreEvent::EdgeUpdated { edge } => write!(f, "updated edge {}", edge),
            StoreEvent::EdgeDeleted { edge } => write!(f, "deleted edge {}", edge),
            StoreEvent::ImpulseApplied {
                edge,
                target,
                delta,
            } => write!(f, "edge {} impulsed node {} by {:+}", edge, target, delta),
            StoreEvent::PropagationFrontier { depth, nodes } => {
                write!(f, "propagation frontier at depth {}: {:?}", depth, nodes)
            }
        }
    }
}
