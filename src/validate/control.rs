//! Fan-in/fan-out rules for Split and Join nodes (K001–K006).

use crate::catalog::{NodeType, outcome};
use crate::error::Diagnostic;
use crate::model::{Node, WorkflowGraph};

pub fn validate_control_nodes(graph: &WorkflowGraph<'_>) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    for node in &graph.snapshot.nodes {
        match node.node_type {
            NodeType::Split => k001_k003_split(node, graph, &mut errors),
            NodeType::Join => k004_k006_join(node, graph, &mut errors),
            NodeType::Action | NodeType::Condition | NodeType::Validation => {}
        }
    }

    errors
}

fn k001_k003_split(node: &Node, graph: &WorkflowGraph<'_>, errors: &mut Vec<Diagnostic>) {
    let incoming = graph.incoming_count(&node.id);
    if incoming != 1 {
        errors.push(Diagnostic::control(
            "K001",
            format!(
                "Split node '{}' must have exactly 1 incoming connection, has {}",
                node.key, incoming
            ),
            &node.key,
        ));
    }

    let outgoing = graph.outgoing(&node.id);
    if outgoing.len() < 2 {
        errors.push(Diagnostic::control(
            "K002",
            format!(
                "Split node '{}' must have at least 2 outgoing connections, has {}",
                node.key,
                outgoing.len()
            ),
            &node.key,
        ));
    }

    for conn in outgoing {
        if conn.outcome != outcome::NEXT {
            errors.push(Diagnostic::control(
                "K003",
                format!(
                    "Split node '{}' outgoing connection '{}' must use outcome '{}', found '{}'",
                    node.key,
                    conn.id,
                    outcome::NEXT,
                    conn.outcome
                ),
                &node.key,
            ));
        }
    }
}

fn k004_k006_join(node: &Node, graph: &WorkflowGraph<'_>, errors: &mut Vec<Diagnostic>) {
    let incoming = graph.incoming_count(&node.id);
    if incoming < 2 {
        errors.push(Diagnostic::control(
            "K004",
            format!(
                "Join node '{}' must have at least 2 incoming connections, has {}",
                node.key, incoming
            ),
            &node.key,
        ));
    }

    let outgoing = graph.outgoing(&node.id);
    match outgoing {
        [single] => {
            if single.outcome != outcome::JOINED {
                errors.push(Diagnostic::control(
                    "K006",
                    format!(
                        "Join node '{}' outgoing connection must use outcome '{}', found '{}'",
                        node.key,
                        outcome::JOINED,
                        single.outcome
                    ),
                    &node.key,
                ));
            }
        }
        _ => errors.push(Diagnostic::control(
            "K005",
            format!(
                "Join node '{}' must have exactly 1 outgoing connection, has {}",
                node.key,
                outgoing.len()
            ),
            &node.key,
        )),
    }
}
