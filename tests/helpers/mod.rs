use chrono::{TimeZone, Utc};
use workflow_compiler::catalog::NodeType;
use workflow_compiler::error::{Diagnostic, Kind};
use workflow_compiler::model::*;
use workflow_compiler::validate::Report;

// =============================================================================
// Snapshot builders
// =============================================================================

/// Empty Draft snapshot with version id `v1`.
pub fn base_snapshot() -> WorkflowSnapshot {
    WorkflowSnapshot {
        version: WorkflowVersion {
            id: "v1".into(),
            definition_id: "def-1".into(),
            version_number: 1,
            status: VersionStatus::Draft,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            published_at: None,
        },
        nodes: vec![],
        connections: vec![],
        variables: vec![],
        labels: vec![],
        settings: None,
        trigger_bindings: vec![],
    }
}

pub fn snapshot_with(nodes: Vec<Node>, connections: Vec<Connection>) -> WorkflowSnapshot {
    let mut snapshot = base_snapshot();
    snapshot.nodes = nodes;
    snapshot.connections = connections;
    snapshot
}

pub fn published(mut snapshot: WorkflowSnapshot) -> WorkflowSnapshot {
    snapshot.version.status = VersionStatus::Published;
    snapshot.version.published_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    snapshot
}

// =============================================================================
// Node / connection builders
// =============================================================================

/// Node whose id and key are both `id`.
pub fn node(id: &str, node_type: NodeType) -> Node {
    Node {
        id: id.into(),
        key: id.into(),
        name: None,
        node_type,
        config: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn node_with_config(id: &str, node_type: NodeType, config: &str) -> Node {
    Node {
        config: Some(config.into()),
        ..node(id, node_type)
    }
}

pub fn conn(id: &str, from: &str, to: &str, outcome: &str) -> Connection {
    Connection {
        id: id.into(),
        from_node_id: from.into(),
        to_node_id: to.into(),
        outcome: outcome.into(),
        order: None,
    }
}

pub fn binding(id: &str, enabled: bool, entries: &[(&str, i32)]) -> TriggerBinding {
    TriggerBinding {
        id: id.into(),
        trigger: Trigger {
            id: format!("trigger-{}", id),
            trigger_type: "Schedule".into(),
            config: Some(r#"{"cron":"0 * * * *"}"#.into()),
        },
        enabled,
        priority: None,
        node_bindings: entries
            .iter()
            .map(|(node_id, order)| TriggerNodeBinding {
                node_id: node_id.to_string(),
                order: *order,
            })
            .collect(),
    }
}

pub fn variable(id: &str, key: &str) -> VariableDefinition {
    VariableDefinition {
        id: id.into(),
        key: key.into(),
        variable_type: "String".into(),
        description: None,
    }
}

pub fn label(id: &str, key: &str) -> LabelDefinition {
    LabelDefinition {
        id: id.into(),
        key: key.into(),
        label_type: "Tag".into(),
        description: None,
    }
}

// =============================================================================
// Report assertions
// =============================================================================

pub fn errors_of(report: &Report, kind: Kind) -> Vec<&Diagnostic> {
    report.errors_of(kind).collect()
}

pub fn assert_has_code(report: &Report, code: &str) {
    assert!(
        report.errors.iter().any(|e| e.code == code),
        "Expected error {}, got: {:?}",
        code,
        report.errors
    );
}

pub fn assert_no_code(report: &Report, code: &str) {
    assert!(
        !report.errors.iter().any(|e| e.code == code),
        "Did not expect error {}, but got: {:?}",
        code,
        report.errors
    );
}
