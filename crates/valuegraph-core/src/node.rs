//! Node type and its normalized layout position.
//!
//! A [`Node`] carries a human-authored value expression alongside its last
//! computed numeric value. The two are allowed to drift apart between
//! explicit evaluate steps -- re-evaluation is deliberately deferred so that
//! intermediate, stepwise changes can be inspected by the surrounding
//! application before values are brought back into agreement.

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// A normalized layout position. Both coordinates live in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Builds a position with both coordinates clamped into [0, 1].
    /// Non-finite inputs collapse to 0.
    pub fn clamped(x: f64, y: f64) -> Self {
        Position {
            x: unit(x),
            y: unit(y),
        }
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// A node in the value graph.
///
/// `label` is the reference token other nodes use in their expressions, so
/// it must be unique among live nodes; the store enforces this. `value` is
/// always finite -- a failed evaluation leaves the last-known-good value in
/// place rather than writing NaN or infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Store-assigned identity, never reused within a session.
    pub id: NodeId,
    /// Display name and reference token.
    pub label: String,
    /// Normalized layout position.
    pub position: Position,
    /// Last computed numeric value.
    pub value: f64,
    /// Source text of the defining expression.
    pub expression: String,
}

impl Node {
    /// Creates a node with a zero value. The store computes the initial
    /// value from `expression` right after insertion.
    pub fn new(id: NodeId, label: String, expression: String, position: Position) -> Self {
        Node {
            id,
            label,
            position,
            value: 0.0,
            expression,
        }
    }
}
