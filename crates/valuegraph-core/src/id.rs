//! Stable ID newtypes for graph entities.
//!
//! All IDs are distinct newtype wrappers over `u64`, providing type safety
//! so that a `NodeId` cannot be accidentally used where an `EdgeId` is
//! expected. IDs are handed out by the store from a monotone counter and
//! are never reused within a session, even after the entity is deleted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

/// Stable typed-edge identifier. Derived edges carry no ID of their own;
/// their identity is the (source, target) pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeId(pub u64);

// Display implementations -- just print the inner value.

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
