//! Compiled, execution-ready projection of a published workflow version.
//!
//! Produced by `compile::compile_snapshot`, consumed by the downstream
//! runtime. Absent optionals are omitted rather than serialized as `null`.

use serde::{Deserialize, Serialize};

use crate::catalog::NodeType;
use crate::model::{LabelDefinition, VariableDefinition, VersionStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledWorkflow {
    pub version: CompiledVersion,
    pub nodes: Vec<CompiledNode>,
    pub connections: Vec<CompiledConnection>,
    pub variables: Vec<VariableDefinition>,
    pub labels: Vec<LabelDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
    /// Enabled trigger bindings only.
    pub triggers: Vec<CompiledTrigger>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledVersion {
    pub id: String,
    pub definition_id: String,
    pub version_number: u32,
    pub status: VersionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledNode {
    pub id: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledConnection {
    pub id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    pub outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledTrigger {
    pub trigger_id: String,
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Ascending by node-binding order.
    pub entry_node_ids: Vec<String>,
}
