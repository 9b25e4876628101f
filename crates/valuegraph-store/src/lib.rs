//! The owning store for the value graph.
//!
//! [`GraphStore`] holds exclusive mutable access to the node/edge
//! collections. Every mutation runs to completion -- including edge
//! re-derivation and any cascading re-evaluation -- before it returns, so a
//! caller never observes the intermediate "nodes updated, edges stale"
//! state. Mutations return structured [`StoreEvent`] records for the
//! surrounding application's log.

pub mod error;
pub mod event;
pub mod propagate;
pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub use error::StoreError;
pub use event::StoreEvent;
pub use propagate::DepthPropagator;
pub use snapshot::GraphSnapshot;
pub use store::GraphStore;
