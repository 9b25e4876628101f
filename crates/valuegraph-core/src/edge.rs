//! Edge types for both evaluation modes.
//!
//! Expression mode uses [`DerivedEdge`]: a pure cache of "who depends on
//! whom", rebuilt from scratch by the edge deriver after every mutation and
//! never created or edited directly. Typed mode uses [`TypedEdge`]: a
//! first-class entity with its own ID and an increment/decrement kind,
//! created and deleted by the user independently of expression content.

use serde::{Deserialize, Serialize};

use crate::id::{EdgeId, NodeId};

/// A dependency edge derived from expression content.
///
/// Exists if and only if the target's current expression references the
/// source's current label. Identity is the (source, target) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivedEdge {
    /// The node whose label is referenced.
    pub source: NodeId,
    /// The node whose expression contains the reference.
    pub target: NodeId,
}

/// The delta a typed edge applies to its target during impulse propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Increment,
    Decrement,
}

impl EdgeKind {
    /// The per-step value delta this kind applies to the edge's target.
    pub fn delta(&self) -> f64 {
        match self {
            EdgeKind::Increment => 1.0,
            EdgeKind::Decrement => -1.0,
        }
    }
}

/// A first-class, user-created edge (typed-edge evaluation mode).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypedEdge {
    pub id: EdgeId,
    pub kind: EdgeKind,
    pub source: NodeId,
    pub target: NodeId,
}
