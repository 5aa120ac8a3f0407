//! Key uniqueness and reference integrity (S001–S004).

use std::collections::HashMap;

use crate::error::Diagnostic;
use crate::model::{WorkflowGraph, WorkflowSnapshot};

pub fn validate_structural(snapshot: &WorkflowSnapshot, graph: &WorkflowGraph<'_>) -> Vec<Diagnostic> {
    let mut errors = Vec::new();

    errors.extend(s001_unique_node_keys(snapshot));
    errors.extend(s002_connection_endpoints_exist(snapshot, graph));
    errors.extend(s003_unique_variable_keys(snapshot));
    errors.extend(s004_unique_label_keys(snapshot));

    errors
}

/// Keys used more than once, in order of first appearance.
fn duplicate_keys<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for key in keys {
        let count = counts.entry(key).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(key);
        }
    }
    order
}

fn s001_unique_node_keys(snapshot: &WorkflowSnapshot) -> Option<Diagnostic> {
    let dups = duplicate_keys(snapshot.nodes.iter().map(|n| n.key.as_str()));
    (!dups.is_empty()).then(|| {
        Diagnostic::structural("S001", format!("Workflow has duplicate node keys: {}", dups.join(", ")))
    })
}

fn s002_connection_endpoints_exist(
    snapshot: &WorkflowSnapshot,
    graph: &WorkflowGraph<'_>,
) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    for conn in &snapshot.connections {
        if !graph.node_indices.contains_key(conn.from_node_id.as_str()) {
            errors.push(Diagnostic::structural(
                "S002",
                format!(
                    "Connection '{}' references unknown source node '{}'",
                    conn.id, conn.from_node_id
                ),
            ));
        }
        if !graph.node_indices.contains_key(conn.to_node_id.as_str()) {
            errors.push(Diagnostic::structural(
                "S002",
                format!(
                    "Connection '{}' references unknown target node '{}'",
                    conn.id, conn.to_node_id
                ),
            ));
        }
    }
    errors
}

fn s003_unique_variable_keys(snapshot: &WorkflowSnapshot) -> Option<Diagnostic> {
    let dups = duplicate_keys(snapshot.variables.iter().map(|v| v.key.as_str()));
    (!dups.is_empty()).then(|| {
        Diagnostic::structural("S003", format!("Workflow has duplicate variable keys: {}", dups.join(", ")))
    })
}

fn s004_unique_label_keys(snapshot: &WorkflowSnapshot) -> Option<Diagnostic> {
    let dups = duplicate_keys(snapshot.labels.iter().map(|l| l.key.as_str()));
    (!dups.is_empty()).then(|| {
        Diagnostic::structural("S004", format!("Workflow has duplicate label keys: {}", dups.join(", ")))
    })
}
