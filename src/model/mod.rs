//! Snapshot data model: JSON → Rust types + graph index.

pub mod config;
pub mod graph;
pub mod types;

pub use config::{JoinConfig, JoinType, NodeConfig, SplitConfig};
pub use graph::WorkflowGraph;
pub use types::*;

use crate::error::RepositoryError;

/// Deserialize a workflow version snapshot from JSON.
pub fn parse_snapshot(json: &str) -> Result<WorkflowSnapshot, RepositoryError> {
    Ok(serde_json::from_str::<WorkflowSnapshot>(json)?)
}
