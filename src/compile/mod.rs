//! Compile phase: published snapshot → CompiledWorkflow.

pub mod trigger;
pub mod types;

pub use types::*;

use tracing::{debug, warn};

use crate::error::CompileError;
use crate::model::{VersionStatus, WorkflowSnapshot};
use crate::repository::WorkflowRepository;

/// Compiles published workflow versions fetched from a repository.
pub struct WorkflowCompiler<R> {
    repository: R,
}

impl<R: WorkflowRepository> WorkflowCompiler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn compile(&self, version_id: &str) -> Result<CompiledWorkflow, CompileError> {
        debug!(version_id, "compiling workflow version");
        let snapshot = self
            .repository
            .load_snapshot(version_id)
            .await
            .map_err(|source| CompileError::Repository {
                id: version_id.to_string(),
                source,
            })?
            .ok_or_else(|| {
                warn!(version_id, "workflow version not found");
                CompileError::NotFound(version_id.to_string())
            })?;

        compile_snapshot(&snapshot)
    }
}

/// Compile an already-loaded snapshot. Only `Published` versions compile.
pub fn compile_snapshot(snapshot: &WorkflowSnapshot) -> Result<CompiledWorkflow, CompileError> {
    let version = &snapshot.version;
    if version.status != VersionStatus::Published {
        warn!(version_id = %version.id, status = %version.status, "refusing to compile unpublished version");
        return Err(CompileError::NotPublished {
            id: version.id.clone(),
            status: version.status.to_string(),
        });
    }

    let compiled = CompiledWorkflow {
        version: CompiledVersion {
            id: version.id.clone(),
            definition_id: version.definition_id.clone(),
            version_number: version.version_number,
            status: version.status,
        },
        nodes: snapshot
            .nodes
            .iter()
            .map(|n| CompiledNode {
                id: n.id.clone(),
                key: n.key.clone(),
                name: n.name.clone(),
                node_type: n.node_type,
                config: n.config.clone(),
            })
            .collect(),
        connections: snapshot
            .connections
            .iter()
            .map(|c| CompiledConnection {
                id: c.id.clone(),
                from_node_id: c.from_node_id.clone(),
                to_node_id: c.to_node_id.clone(),
                outcome: c.outcome.clone(),
                order: c.order,
            })
            .collect(),
        variables: snapshot.variables.clone(),
        labels: snapshot.labels.clone(),
        settings: snapshot.settings.clone(),
        triggers: trigger::compile_triggers(&snapshot.trigger_bindings),
    };

    debug!(
        version_id = %version.id,
        nodes = compiled.nodes.len(),
        triggers = compiled.triggers.len(),
        "compiled workflow version"
    );
    Ok(compiled)
}
