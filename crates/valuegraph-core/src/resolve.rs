//! Recursive value resolution over the node table.
//!
//! Resolution always recurses into a referenced node's *expression*, never
//! its cached `value` field -- the cached field may be stale by design. A
//! stack of labels currently in flight guards against reference cycles:
//! revisiting one fails with [`EvalError::CyclicDependency`] instead of
//! recursing unboundedly.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::arith::evaluate;
use crate::error::EvalError;
use crate::expr::{extract_references, substitute};
use crate::id::NodeId;
use crate::node::Node;

/// Computes `node`'s numeric value from its expression and the live node
/// table.
///
/// # Errors
///
/// - [`EvalError::UnresolvedReference`] if a quoted label matches no node.
/// - [`EvalError::CyclicDependency`] if the reference chain revisits a node.
/// - [`EvalError::MalformedExpression`] from the arithmetic stage.
pub fn resolve_value(nodes: &IndexMap<NodeId, Node>, node: &Node) -> Result<f64, EvalError> {
    let mut in_flight: Vec<&str> = Vec::new();
    resolve_expression(nodes, &node.label, &node.expression, &mut in_flight)
}

fn resolve_expression<'a>(
    nodes: &'a IndexMap<NodeId, Node>,
    label: &'a str,
    expression: &'a str,
    in_flight: &mut Vec<&'a str>,
) -> Result<f64, EvalError> {
    if in_flight.contains(&label) {
        return Err(EvalError::CyclicDependency {
            label: label.to_string(),
        });
    }
    in_flight.push(label);

    let mut values: HashMap<&str, f64> = HashMap::new();
    for reference in extract_references(expression) {
        if values.contains_key(reference) {
            continue;
        }
        let target = find_by_label(nodes, reference).ok_or_else(|| {
            EvalError::UnresolvedReference {
                label: reference.to_string(),
            }
        })?;
        let value =
            resolve_expression(nodes, &target.label, &target.expression, in_flight)?;
        values.insert(reference, value);
    }

    in_flight.pop();
    let substituted = substitute(expression, &values)?;
    evaluate(&substituted)
}

fn find_by_label<'a>(nodes: &'a IndexMap<NodeId, Node>, label: &str) -> Option<&'a Node> {
    nodes.values().find(|n| n.label == label)
}
