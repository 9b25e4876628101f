//! GraphStore: the single owner of the node/edge collections.
//!
//! All mutations go through [`GraphStore`] methods. Each one validates its
//! IDs first (an `UnknownNode`/`UnknownEdge` rejection leaves no partial
//! state), applies the change, re-derives the cached dependency edge set,
//! and returns the [`StoreEvent`] records it produced.
//!
//! Evaluation is deferred by design: editing an expression re-resolves the
//! edited node and its transitive dependents, but `value` and `expression`
//! are otherwise allowed to drift until an explicit evaluate step. A failed
//! resolution never corrupts a node's last-known-good value.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, warn};

use valuegraph_core::derive::derive_edges;
use valuegraph_core::edge::{DerivedEdge, EdgeKind, TypedEdge};
use valuegraph_core::id::{EdgeId, NodeId};
use valuegraph_core::node::{Node, Position};
use valuegraph_core::resolve::resolve_value;

use crate::error::StoreError;
use crate::event::StoreEvent;

/// The authoritative, single-threaded graph state.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: IndexMap<NodeId, Node>,
    derived: Vec<DerivedEdge>,
    typed: IndexMap<EdgeId, TypedEdge>,
    /// Node ids charged for the next typed-mode propagation step.
    impulses: IndexSet<NodeId>,
    selected: Option<NodeId>,
    next_node_id: u64,
    next_edge_id: u64,
}

impl GraphStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        GraphStore::default()
    }

    /// Constructs a store from restored parts. Counters must be beyond any
    /// id present in the collections; the derived edge set is recomputed
    /// rather than trusted.
    pub(crate) fn from_parts(
        nodes: IndexMap<NodeId, Node>,
        typed: IndexMap<EdgeId, TypedEdge>,
        next_node_id: u64,
        next_edge_id: u64,
    ) -> Self {
        let derived = derive_edges(&nodes);
        GraphStore {
            nodes,
            derived,
            typed,
            impulses: IndexSet::new(),
            selected: None,
            next_node_id,
            next_edge_id,
        }
    }

    // -----------------------------------------------------------------------
    // Node mutations
    // -----------------------------------------------------------------------

    /// Creates a node and computes its initial value from `expression`.
    ///
    /// If the initial evaluation fails the node keeps value 0 and the
    /// failure is reported as an [`StoreEvent::EvaluationFailed`] event --
    /// an unresolved or malformed expression is an expected editing state,
    /// not a rejected mutation. Duplicate live labels are rejected so
    /// references stay unambiguous.
    pub fn create_node(
        &mut self,
        label: &str,
        expression: &str,
        position: Position,
    ) -> Result<(NodeId, Vec<StoreEvent>), StoreError> {
        if self.nodes.values().any(|n| n.label == label) {
            return Err(StoreError::DuplicateLabel {
                label: label.to_string(),
            });
        }

        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(
            id,
            Node::new(id, label.to_string(), expression.to_string(), position),
        );
        self.rederive();

        let mut events = vec![StoreEvent::NodeCreated {
            node: id,
            label: label.to_string(),
        }];
        events.extend(self.reevaluate(id));
        debug!(node = id.0, label, "created node");
        Ok((id, events))
    }

    /// Renames a node and rewrites every expression that referenced the old
    /// label so references keep resolving to the same node. The rewritten
    /// expressions are always persisted.
    pub fn rename_node(
        &mut self,
        id: NodeId,
        new_label: &str,
    ) -> Result<Vec<StoreEvent>, StoreError> {
        let old = self
            .nodes
            .get(&id)
            .ok_or(StoreError::UnknownNode { id })?
            .label
            .clone();
        if self
            .nodes
            .values()
            .any(|n| n.id != id && n.label == new_label)
        {
            return Err(StoreError::DuplicateLabel {
                label: new_label.to_string(),
            });
        }
        if old == new_label {
            return Ok(Vec::new());
        }

        self.nodes[&id].label = new_label.to_string();
        let mut events = vec![StoreEvent::LabelRenamed {
            node: id,
            old: old.clone(),
            new: new_label.to_string(),
        }];

        // Quoted-token rewrite, not raw substring replacement: a label that
        // happens to appear inside another label or in literal text is
        // untouched.
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for node_id in ids {
            let expression = self.nodes[&node_id].expression.clone();
            if let Some(rewritten) = rewrite_references(&expression, &old, new_label) {
                self.nodes[&node_id].expression = rewritten.clone();
                events.push(StoreEvent::ExpressionRewritten {
                    node: node_id,
                    old: expression,
                    new: rewritten,
                });
            }
        }

        self.rederive();
        info!(node = id.0, %old, new = new_label, "renamed node");
        Ok(events)
    }

    /// Replaces a node's expression, then re-resolves the node and every
    /// transitive dependent. Failed resolutions are reported as events and
    /// leave the affected node's value untouched.
    pub fn edit_expression(
        &mut self,
        id: NodeId,
        new_expression: &str,
    ) -> Result<Vec<StoreEvent>, StoreError> {
        let old = self
            .nodes
            .get(&id)
            .ok_or(StoreError::UnknownNode { id })?
            .expression
            .clone();

        self.nodes[&id].expression = new_expression.to_string();
        self.rederive();

        let mut events = vec![StoreEvent::ExpressionRewritten {
            node: id,
            old,
            new: new_expression.to_string(),
        }];
        for affected in self.dependents_of(id) {
            events.extend(self.reevaluate(affected));
        }
        debug!(node = id.0, expression = new_expression, "edited expression");
        Ok(events)
    }

    /// Pure position update; no re-evaluation. Accepts moves at any rate --
    /// drag coalescing is a collaborator concern, not a store contract.
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), StoreError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(StoreError::UnknownNode { id })?;
        node.position = Position::clamped(x, y);
        Ok(())
    }

    /// Deletes a node, every typed edge incident to it, and its impulse
    /// charge; clears the selection if it pointed at the node.
    pub fn delete_node(&mut self, id: NodeId) -> Result<Vec<StoreEvent>, StoreError> {
        let node = self
            .nodes
            .shift_remove(&id)
            .ok_or(StoreError::UnknownNode { id })?;

        let mut events = vec![StoreEvent::NodeDeleted {
            node: id,
            label: node.label,
        }];
        let removed: Vec<EdgeId> = self
            .typed
            .values()
            .filter(|e| e.source == id || e.target == id)
            .map(|e| e.id)
            .collect();
        for edge_id in removed {
            self.typed.shift_remove(&edge_id);
            events.push(StoreEvent::EdgeDeleted { edge: edge_id });
        }
        self.impulses.shift_remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.rederive();
        debug!(node = id.0, "deleted node");
        Ok(events)
    }

    // -----------------------------------------------------------------------
    // Explicit evaluation
    // -----------------------------------------------------------------------

    /// Explicit evaluate step for one node. On success the resolved value
    /// is stored and returned; on failure the last-known-good value is left
    /// unchanged and the failure is returned attached to the node.
    pub fn evaluate_node(&mut self, id: NodeId) -> Result<f64, StoreError> {
        let node = self
            .nodes
            .get(&id)
            .ok_or(StoreError::UnknownNode { id })?
            .clone();
        match resolve_value(&self.nodes, &node) {
            Ok(value) => {
                self.nodes[&id].value = value;
                Ok(value)
            }
            Err(source) => {
                warn!(node = id.0, error = %source, "evaluation failed; keeping last value");
                Err(StoreError::Eval { node: id, source })
            }
        }
    }

    /// Evaluates every node, collecting per-node failures as events.
    /// Succeeding nodes are updated even when siblings fail.
    pub fn evaluate_all(&mut self) -> Vec<StoreEvent> {
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        let mut events = Vec::new();
        for id in ids {
            events.extend(self.reevaluate(id));
        }
        events
    }

    // -----------------------------------------------------------------------
    // Typed edge mutations (typed-edge evaluation mode)
    // -----------------------------------------------------------------------

    /// Creates a typed edge. Both endpoints must exist.
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        kind: EdgeKind,
    ) -> Result<(EdgeId, Vec<StoreEvent>), StoreError> {
        if !self.nodes.contains_key(&source) {
            return Err(StoreError::UnknownNode { id: source });
        }
        if !self.nodes.contains_key(&target) {
            return Err(StoreError::UnknownNode { id: target });
        }
        let id = EdgeId(self.next_edge_id);
        self.next_edge_id += 1;
        self.typed.insert(
            id,
            TypedEdge {
                id,
                kind,
                source,
                target,
            },
        );
        debug!(edge = id.0, "created typed edge");
        Ok((
            id,
            vec![StoreEvent::EdgeCreated {
                edge: id,
                source,
                target,
            }],
        ))
    }

    /// Changes a typed edge's kind.
    pub fn update_edge(
        &mut self,
        id: EdgeId,
        kind: EdgeKind,
    ) -> Result<Vec<StoreEvent>, StoreError> {
        let edge = self
            .typed
            .get_mut(&id)
            .ok_or(StoreError::UnknownEdge { id })?;
        edge.kind = kind;
        Ok(vec![StoreEvent::EdgeUpdated { edge: id }])
    }

    /// Deletes a typed edge.
    pub fn delete_edge(&mut self, id: EdgeId) -> Result<Vec<StoreEvent>, StoreError> {
        self.typed
            .shift_remove(&id)
            .ok_or(StoreError::UnknownEdge { id })?;
        Ok(vec![StoreEvent::EdgeDeleted { edge: id }])
    }

    // -----------------------------------------------------------------------
    // Impulse propagation (typed-edge evaluation mode)
    // -----------------------------------------------------------------------

    /// Charges a node as a source for the next propagation step.
    pub fn impulse(&mut self, id: NodeId) -> Result<(), StoreError> {
        if !self.nodes.contains_key(&id) {
            return Err(StoreError::UnknownNode { id });
        }
        self.impulses.insert(id);
        Ok(())
    }

    /// Explicitly returns the propagator to idle. An impulse set that
    /// merely runs empty does not reset applied values or marks; only this
    /// does.
    pub fn reset_impulses(&mut self) {
        self.impulses.clear();
    }

    /// Advances typed-edge propagation by one step.
    ///
    /// For every typed edge whose source is charged, applies the edge's
    /// delta to the target's value (converging edges each apply once), then
    /// replaces the impulse set wholesale with the first-seen de-duplicated
    /// set of touched targets. An empty charge set yields no change.
    pub fn propagate_step(&mut self) -> Vec<StoreEvent> {
        let charged: Vec<NodeId> = self.impulses.iter().copied().collect();
        let mut next: IndexSet<NodeId> = IndexSet::new();
        let mut events = Vec::new();

        for source in charged {
            let outgoing: Vec<TypedEdge> = self
                .typed
                .values()
                .filter(|e| e.source == source)
                .copied()
                .collect();
            for edge in outgoing {
                let Some(target) = self.nodes.get_mut(&edge.target) else {
                    continue;
                };
                target.value += edge.kind.delta();
                next.insert(edge.target);
                events.push(StoreEvent::ImpulseApplied {
                    edge: edge.id,
                    target: edge.target,
                    delta: edge.kind.delta(),
                });
            }
        }

        self.impulses = next;
        events
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Sets or clears the current selection.
    pub fn select(&mut self, id: Option<NodeId>) -> Result<(), StoreError> {
        if let Some(id) = id {
            if !self.nodes.contains_key(&id) {
                return Err(StoreError::UnknownNode { id });
            }
        }
        self.selected = id;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a node by its label.
    pub fn node_by_label(&self, label: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.label == label)
    }

    /// Iterates nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// The cached derived edge set, always in agreement with the current
    /// expressions.
    pub fn derived_edges(&self) -> &[DerivedEdge] {
        &self.derived
    }

    /// Iterates typed edges in creation order.
    pub fn typed_edges(&self) -> impl Iterator<Item = &TypedEdge> {
        self.typed.values()
    }

    /// The currently charged impulse set, in first-seen order.
    pub fn impulses(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.impulses.iter().copied()
    }

    /// The current selection.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Returns the number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of typed edges.
    pub fn typed_edge_count(&self) -> usize {
        self.typed.len()
    }

    pub(crate) fn node_table(&self) -> &IndexMap<NodeId, Node> {
        &self.nodes
    }

    pub(crate) fn typed_table(&self) -> &IndexMap<EdgeId, TypedEdge> {
        &self.typed
    }

    pub(crate) fn counters(&self) -> (u64, u64) {
        (self.next_node_id, self.next_edge_id)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn rederive(&mut self) {
        self.derived = derive_edges(&self.nodes);
    }

    /// The node itself plus every transitive dependent along derived edges,
    /// in breadth-first first-seen order.
    fn dependents_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen: IndexSet<NodeId> = IndexSet::new();
        seen.insert(id);
        let mut cursor = 0;
        while cursor < seen.len() {
            let current = seen[cursor];
            for edge in &self.derived {
                if edge.source == current {
                    seen.insert(edge.target);
                }
            }
            cursor += 1;
        }
        seen.into_iter().collect()
    }

    /// Resolves one node, updating its value on success and reporting a
    /// failure event (value untouched) otherwise.
    fn reevaluate(&mut self, id: NodeId) -> Vec<StoreEvent> {
        let Some(node) = self.nodes.get(&id).cloned() else {
            return Vec::new();
        };
        match resolve_value(&self.nodes, &node) {
            Ok(value) if value != node.value => {
                self.nodes[&id].value = value;
                vec![StoreEvent::ValueChanged {
                    node: id,
                    old: node.value,
                    new: value,
                }]
            }
            Ok(_) => Vec::new(),
            Err(error) => {
                warn!(node = id.0, %error, "evaluation failed; keeping last value");
                vec![StoreEvent::EvaluationFailed { node: id, error }]
            }
        }
    }
}

/// Rewrites every quoted occurrence of `old` to `new`, returning `None`
/// when nothing matched. Non-reference text and dangling quote fragments
/// are preserved verbatim.
fn rewrite_references(expression: &str, old: &str, new: &str) -> Option<String> {
    let mut out = String::with_capacity(expression.len());
    let mut changed = false;
    let mut rest = expression;
    while let Some(open) = rest.find('"') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('"') {
            Some(close) => {
                let label = &after[..close];
                out.push('"');
                if label == old {
                    out.push_str(new);
                    changed = true;
                } else {
                    out.push_str(label);
                }
                out.push('"');
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                return changed.then_some(out);
            }
        }
    }
    out.push_str(rest);
    changed.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuegraph_core::error::EvalError;

    fn pos() -> Position {
        Position::clamped(0.5, 0.5)
    }

    #[test]
    fn create_node_computes_initial_value() {
        let mut store = GraphStore::new();
        let (id, events) = store.create_node("A", "1+2", pos()).unwrap();
        assert_eq!(store.node(id).unwrap().value, 3.0);
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::ValueChanged { new, .. } if *new == 3.0)));
    }

    #[test]
    fn create_node_with_bad_expression_keeps_zero() {
        let mut store = GraphStore::new();
        let (id, events) = store.create_node("A", "\"ghost\"+1", pos()).unwrap();
        assert_eq!(store.node(id).unwrap().value, 0.0);
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::EvaluationFailed { .. })));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let mut store = GraphStore::new();
        store.create_node("A", "1", pos()).unwrap();
        let err = store.create_node("A", "2", pos()).unwrap_err();
        assert_eq!(err, StoreError::DuplicateLabel { label: "A".into() });
    }

    #[test]
    fn node_ids_are_never_reused() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        store.delete_node(a).unwrap();
        let (b, _) = store.create_node("B", "1", pos()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_id_is_rejected_before_any_state_change() {
        let mut store = GraphStore::new();
        store.create_node("A", "1", pos()).unwrap();
        let before = store.clone();
        let ghost = NodeId(999);

        assert!(store.rename_node(ghost, "B").is_err());
        assert!(store.edit_expression(ghost, "2").is_err());
        assert!(store.move_node(ghost, 0.1, 0.1).is_err());
        assert!(store.delete_node(ghost).is_err());
        assert!(store.evaluate_node(ghost).is_err());
        assert!(store.impulse(ghost).is_err());
        assert!(store.select(Some(ghost)).is_err());

        assert_eq!(store.node_count(), before.node_count());
        assert_eq!(store.derived_edges(), before.derived_edges());
    }

    #[test]
    fn edges_are_rederived_inside_every_mutation() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        let (b, _) = store.create_node("B", "\"A\"+1", pos()).unwrap();
        assert_eq!(
            store.derived_edges(),
            &[DerivedEdge { source: a, target: b }]
        );

        store.edit_expression(b, "2").unwrap();
        assert!(store.derived_edges().is_empty());

        store.edit_expression(b, "\"A\"*3").unwrap();
        assert_eq!(
            store.derived_edges(),
            &[DerivedEdge { source: a, target: b }]
        );
    }

    #[test]
    fn rename_rewrites_dependent_expressions_and_persists() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        let (b, _) = store.create_node("B", "\"A\"+1", pos()).unwrap();

        let events = store.rename_node(a, "base").unwrap();
        assert_eq!(store.node(b).unwrap().expression, "\"base\"+1");
        assert!(events.iter().any(|e| matches!(
            e,
            StoreEvent::LabelRenamed { old, new, .. } if old == "A" && new == "base"
        )));
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::ExpressionRewritten { node, .. } if *node == b)));

        // Topology survives under the new label.
        assert_eq!(
            store.derived_edges(),
            &[DerivedEdge { source: a, target: b }]
        );
        assert_eq!(store.evaluate_node(b).unwrap(), 2.0);
    }

    #[test]
    fn rename_does_not_touch_lookalike_text() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        let (b, _) = store.create_node("AB", "\"A\"+2", pos()).unwrap();
        store.rename_node(a, "Z").unwrap();
        // The "AB" label itself is not a quoted occurrence of "A".
        assert_eq!(store.node(b).unwrap().label, "AB");
        assert_eq!(store.node(b).unwrap().expression, "\"Z\"+2");
    }

    #[test]
    fn rename_to_same_label_is_a_no_op() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        assert!(store.rename_node(a, "A").unwrap().is_empty());
    }

    #[test]
    fn rename_to_existing_label_is_rejected() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        store.create_node("B", "2", pos()).unwrap();
        assert_eq!(
            store.rename_node(a, "B").unwrap_err(),
            StoreError::DuplicateLabel { label: "B".into() }
        );
    }

    #[test]
    fn edit_expression_cascades_to_transitive_dependents() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        let (b, _) = store.create_node("B", "\"A\"+1", pos()).unwrap();
        let (c, _) = store.create_node("C", "\"B\"+1", pos()).unwrap();
        assert_eq!(store.node(c).unwrap().value, 3.0);

        store.edit_expression(a, "10").unwrap();
        assert_eq!(store.node(a).unwrap().value, 10.0);
        assert_eq!(store.node(b).unwrap().value, 11.0);
        assert_eq!(store.node(c).unwrap().value, 12.0);
    }

    #[test]
    fn failed_evaluation_keeps_last_known_good_value() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "5", pos()).unwrap();
        let events = store.edit_expression(a, "1/0").unwrap();
        assert_eq!(store.node(a).unwrap().value, 5.0);
        assert!(events.iter().any(|e| matches!(
            e,
            StoreEvent::EvaluationFailed {
                error: EvalError::MalformedExpression { .. },
                ..
            }
        )));

        let err = store.evaluate_node(a).unwrap_err();
        assert!(matches!(err, StoreError::Eval { node, .. } if node == a));
        assert_eq!(store.node(a).unwrap().value, 5.0);
    }

    #[test]
    fn move_node_clamps_and_skips_reevaluation() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1/0", pos()).unwrap();
        store.move_node(a, 2.0, -1.0).unwrap();
        let node = store.node(a).unwrap();
        assert_eq!(node.position.x, 1.0);
        assert_eq!(node.position.y, 0.0);
        // A broken expression does not get in the way of moving.
        assert_eq!(node.value, 0.0);
    }

    #[test]
    fn delete_node_cascades_to_incident_edges_and_selection() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        let (b, _) = store.create_node("B", "1", pos()).unwrap();
        let (c, _) = store.create_node("C", "1", pos()).unwrap();
        store.create_edge(a, b, EdgeKind::Increment).unwrap();
        store.create_edge(b, c, EdgeKind::Decrement).unwrap();
        let (keep, _) = store.create_edge(a, c, EdgeKind::Increment).unwrap();
        store.select(Some(b)).unwrap();
        store.impulse(b).unwrap();

        let events = store.delete_node(b).unwrap();
        assert_eq!(store.typed_edge_count(), 1);
        assert!(store.typed_edges().all(|e| e.id == keep));
        assert_eq!(store.selected(), None);
        assert_eq!(store.impulses().count(), 0);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, StoreEvent::EdgeDeleted { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn deleting_a_referenced_node_leaves_dependents_unresolved() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        let (b, _) = store.create_node("B", "\"A\"+1", pos()).unwrap();
        store.delete_node(a).unwrap();

        assert!(store.derived_edges().is_empty());
        let err = store.evaluate_node(b).unwrap_err();
        assert_eq!(
            err,
            StoreError::Eval {
                node: b,
                source: EvalError::UnresolvedReference { label: "A".into() }
            }
        );
    }

    #[test]
    fn evaluate_all_updates_survivors_despite_failures() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "2", pos()).unwrap();
        let (b, _) = store.create_node("B", "\"ghost\"", pos()).unwrap();
        store.edit_expression(a, "4").unwrap();

        let events = store.evaluate_all();
        assert_eq!(store.node(a).unwrap().value, 4.0);
        assert_eq!(store.node(b).unwrap().value, 0.0);
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::EvaluationFailed { node, .. } if *node == b)));
    }

    #[test]
    fn update_and_delete_edge() {
        let mut store = GraphStore::new();
        let (a, _) = store.create_node("A", "1", pos()).unwrap();
        let (b, _) = store.create_node("B", "1", pos()).unwrap();
        let (e, _) = store.create_edge(a, b, EdgeKind::Increment).unwrap();

        store.update_edge(e, EdgeKind::Decrement).unwrap();
        assert_eq!(
            store.typed_edges().next().unwrap().kind,
            EdgeKind::Decrement
        );

        store.delete_edge(e).unwrap();
        assert_eq!(store.typed_edge_count(), 0);
        assert_eq!(
            store.delete_edge(e).unwrap_err(),
            StoreError::UnknownEdge { id: e }
        );
    }

    #[test]
    fn rewrite_references_ignores_unquoted_text() {
        assert_eq!(rewrite_references("A + 1", "A", "B"), None);
        assert_eq!(
            rewrite_references("\"A\" + A", "A", "B").as_deref(),
            Some("\"B\" + A")
        );
    }

    #[test]
    fn rewrite_references_keeps_dangling_fragment() {
        assert_eq!(
            rewrite_references("\"A\" + \"oops", "A", "B").as_deref(),
            Some("\"B\" + \"oops")
        );
        assert_eq!(rewrite_references("\"oops", "oops", "B"), None);
    }
}
