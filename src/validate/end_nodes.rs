//! Terminal-node rules (T001–T003).
//!
//! An end node is any node with zero outgoing connections.

use std::collections::HashSet;

use crate::error::Diagnostic;
use crate::model::WorkflowGraph;

pub fn validate_end_nodes(graph: &WorkflowGraph<'_>, entry_node_ids: &HashSet<&str>) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    let end_nodes: Vec<_> = graph
        .snapshot
        .nodes
        .iter()
        .filter(|n| graph.outgoing_count(&n.id) == 0)
        .collect();

    if end_nodes.is_empty() {
        errors.push(Diagnostic::topology(
            "T001",
            "Workflow must have at least one end node",
        ));
    }

    for node in &end_nodes {
        if node.node_type.is_control() {
            errors.push(
                Diagnostic::topology(
                    "T002",
                    format!(
                        "{} node '{}' cannot be an end node; control nodes need an outgoing connection",
                        node.node_type, node.key
                    ),
                )
                .at_node(&node.key),
            );
        }
        if entry_node_ids.contains(node.id.as_str()) {
            errors.push(
                Diagnostic::topology(
                    "T003",
                    format!(
                        "Node '{}' is a trigger entry point and cannot also be an end node",
                        node.key
                    ),
                )
                .at_node(&node.key),
            );
        }
    }

    errors
}
