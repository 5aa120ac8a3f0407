//! Workflow version snapshot as handed over by the repository.
//!
//! These types are the serde target for the snapshot JSON. Field names are
//! camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::NodeType;

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Everything owned by one workflow version, read in a single fetch.
/// Treated as immutable for the duration of a validation or compile call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    pub version: WorkflowVersion,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub variables: Vec<VariableDefinition>,
    #[serde(default)]
    pub labels: Vec<LabelDefinition>,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
    #[serde(default)]
    pub trigger_bindings: Vec<TriggerBinding>,
}

impl WorkflowSnapshot {
    /// Ids of every node named as an entry point by any trigger binding,
    /// enabled or not.
    pub fn trigger_entry_node_ids(&self) -> impl Iterator<Item = &str> {
        self.trigger_bindings
            .iter()
            .flat_map(|b| b.node_bindings.iter().map(|nb| nb.node_id.as_str()))
    }
}

// =============================================================================
// VERSION
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowVersion {
    pub id: String,
    pub definition_id: String,
    pub version_number: u32,
    pub status: VersionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Lifecycle of a version: `Draft` → `Published` → `Archived`/`Deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionStatus {
    Draft,
    Published,
    Archived,
    Deleted,
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionStatus::Draft => write!(f, "Draft"),
            VersionStatus::Published => write!(f, "Published"),
            VersionStatus::Archived => write!(f, "Archived"),
            VersionStatus::Deleted => write!(f, "Deleted"),
        }
    }
}

// =============================================================================
// NODES & CONNECTIONS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    /// Unique within the owning version.
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Raw configuration text; its schema depends on `node_type`.
    #[serde(default)]
    pub config: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    pub outcome: String,
    #[serde(default)]
    pub order: Option<i32>,
}

// =============================================================================
// TRIGGERS
// =============================================================================

/// An externally defined trigger, as joined into a binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub id: String,
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default)]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerBinding {
    pub id: String,
    pub trigger: Trigger,
    pub enabled: bool,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub node_bindings: Vec<TriggerNodeBinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerNodeBinding {
    pub node_id: String,
    pub order: i32,
}

// =============================================================================
// VARIABLES & LABELS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefinition {
    pub id: String,
    pub key: String,
    #[serde(rename = "type")]
    pub variable_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDefinition {
    pub id: String,
    pub key: String,
    #[serde(rename = "type")]
    pub label_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
