pub mod arith;
pub mod derive;
pub mod edge;
pub mod error;
pub mod expr;
pub mod id;
pub mod node;
pub mod resolve;

// Re-export commonly used types
pub use derive::derive_edges;
pub use edge::{DerivedEdge, EdgeKind, TypedEdge};
pub use error::EvalError;
pub use expr::{extract_references, substitute};
pub use id::{EdgeId, NodeId};
pub use node::{Node, Position};
pub use resolve::resolve_value;
