//! Snapshot source consumed by the engine and the compiler.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::model::{WorkflowSnapshot, parse_snapshot};

/// Loads the full snapshot of a workflow version: nodes, connections,
/// variables, labels, settings and trigger bindings (each binding joined
/// with its trigger and ordered node bindings).
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// `Ok(None)` when no version with `version_id` exists.
    async fn load_snapshot(&self, version_id: &str) -> Result<Option<WorkflowSnapshot>, RepositoryError>;
}

#[async_trait]
impl<T: WorkflowRepository + ?Sized> WorkflowRepository for &T {
    async fn load_snapshot(&self, version_id: &str) -> Result<Option<WorkflowSnapshot>, RepositoryError> {
        (**self).load_snapshot(version_id).await
    }
}

/// Snapshots held in memory, keyed by version id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    snapshots: HashMap<String, WorkflowSnapshot>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, snapshot: WorkflowSnapshot) {
        self.snapshots.insert(snapshot.version.id.clone(), snapshot);
    }

    pub fn insert_json(&mut self, json: &str) -> Result<(), RepositoryError> {
        self.insert(parse_snapshot(json)?);
        Ok(())
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryRepository {
    async fn load_snapshot(&self, version_id: &str) -> Result<Option<WorkflowSnapshot>, RepositoryError> {
        Ok(self.snapshots.get(version_id).cloned())
    }
}
