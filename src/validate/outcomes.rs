//! Outcome-label rules on outgoing connections (O001–O003).

use std::collections::HashMap;

use crate::error::Diagnostic;
use crate::model::{Node, WorkflowGraph};

pub fn validate_outcomes(graph: &WorkflowGraph<'_>) -> Vec<Diagnostic> {
    graph
        .snapshot
        .nodes
        .iter()
        .flat_map(|node| validate_node_outcomes(node, graph))
        .collect()
}

fn validate_node_outcomes(node: &Node, graph: &WorkflowGraph<'_>) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    let outgoing = graph.outgoing(&node.id);
    let node_type = node.node_type;

    for conn in outgoing {
        if !node_type.allows_outcome(&conn.outcome) {
            errors.push(Diagnostic::outcome(
                "O001",
                format!(
                    "Node '{}' of type {} has outgoing connection with outcome '{}'; allowed outcomes: {}",
                    node.key,
                    node_type,
                    conn.outcome,
                    node_type.allowed_outcomes().join(", ")
                ),
                &node.key,
            ));
        }
    }

    // Split and Join shapes are governed by the control-node rules.
    if node_type.is_control() {
        return errors;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen = Vec::new();
    for conn in outgoing {
        let count = counts.entry(conn.outcome.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(conn.outcome.as_str());
        }
        *count += 1;
    }

    for label in &first_seen {
        let count = counts[label];
        if count > 1 {
            errors.push(Diagnostic::outcome(
                "O002",
                format!(
                    "Node '{}' uses outcome '{}' on {} outgoing connections; each outcome may be used once",
                    node.key, label, count
                ),
                &node.key,
            ));
        }
    }

    for required in node_type.required_outcomes() {
        if !counts.contains_key(required) {
            errors.push(Diagnostic::outcome(
                "O003",
                format!("Node '{}' is missing required outcome '{}'", node.key, required),
                &node.key,
            ));
        }
    }

    errors
}
