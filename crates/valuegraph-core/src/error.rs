//! Evaluation error types.
//!
//! Uses `thiserror` for structured, matchable error variants. Extraction and
//! edge derivation never fail -- they degrade to "no reference" / "skip" on
//! malformed or unresolvable input, since those are expected transient
//! states during live editing. Only the evaluation pipeline produces errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while resolving and evaluating a node's expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum EvalError {
    /// Arithmetic syntax error, division by zero, or a non-finite result.
    #[error("malformed expression: {detail}")]
    MalformedExpression { detail: String },

    /// A quoted label does not match any live node.
    #[error("unresolved reference: '{label}'")]
    UnresolvedReference { label: String },

    /// A reference chain revisits a node already being resolved.
    #[error("cyclic dependency through '{label}'")]
    CyclicDependency { label: String },
}
