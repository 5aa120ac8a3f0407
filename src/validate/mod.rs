//! Workflow validation engine.
//!
//! Runs every check against a version snapshot and folds the findings into
//! a `Report`. Checks are independent: one failing check never suppresses
//! another. Only a missing version short-circuits.

pub mod control;
pub mod end_nodes;
pub mod node_rules;
pub mod outcomes;
pub mod structural;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::{self, GraphAnalysis};
use crate::error::{Diagnostic, Kind, RepositoryError};
use crate::model::{Node, WorkflowGraph, WorkflowSnapshot};
use crate::repository::WorkflowRepository;

/// Public outcome of a validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Accumulated findings of one validation run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl Report {
    /// Route each diagnostic to `errors` or `warnings` by its kind.
    pub fn merge(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for d in diagnostics {
            if d.kind.is_warning() {
                self.warnings.push(d);
            } else {
                self.errors.push(d);
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors_of(&self, kind: Kind) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().filter(move |d| d.kind == kind)
    }

    pub fn warnings_of(&self, kind: Kind) -> impl Iterator<Item = &Diagnostic> {
        self.warnings.iter().filter(move |d| d.kind == kind)
    }

    pub fn into_result(self) -> ValidationResult {
        ValidationResult {
            is_valid: self.is_valid(),
            errors: self.errors.iter().map(ToString::to_string).collect(),
            warnings: self.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Validates workflow versions fetched from a repository.
pub struct WorkflowValidationEngine<R> {
    repository: R,
}

impl<R: WorkflowRepository> WorkflowValidationEngine<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Fetch the snapshot for `version_id` and validate it.
    ///
    /// A missing version yields a single NotFound error. A failing fetch is
    /// surfaced as-is.
    pub async fn validate(&self, version_id: &str) -> Result<ValidationResult, RepositoryError> {
        Ok(self.report(version_id).await?.into_result())
    }

    pub async fn report(&self, version_id: &str) -> Result<Report, RepositoryError> {
        debug!(version_id, "validating workflow version");
        match self.repository.load_snapshot(version_id).await? {
            Some(snapshot) => Ok(validate_snapshot(&snapshot)),
            None => {
                warn!(version_id, "workflow version not found");
                let mut report = Report::default();
                report.merge([Diagnostic::new(
                    "R001",
                    Kind::NotFound,
                    format!("Workflow version '{}' not found", version_id),
                )]);
                Ok(report)
            }
        }
    }
}

/// Validate an already-loaded snapshot.
pub fn validate_snapshot(snapshot: &WorkflowSnapshot) -> Report {
    let graph = WorkflowGraph::build(snapshot);
    let entry_node_ids: HashSet<&str> = snapshot.trigger_entry_node_ids().collect();

    let mut report = Report::default();
    report.merge(structural::validate_structural(snapshot, &graph));
    for node in &snapshot.nodes {
        report.merge(validate_node(node));
    }
    report.merge(outcomes::validate_outcomes(&graph));
    report.merge(control::validate_control_nodes(&graph));
    report.merge(end_nodes::validate_end_nodes(&graph, &entry_node_ids));
    report.merge(topology_warnings(&graph, &analysis::analyze(&graph)));

    debug!(
        version_id = %snapshot.version.id,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    report
}

/// Validate a single node's configuration.
pub fn validate_node(node: &Node) -> Vec<Diagnostic> {
    node_rules::validate_node_config(node)
}

fn topology_warnings(graph: &WorkflowGraph<'_>, analysis: &GraphAnalysis) -> Vec<Diagnostic> {
    let key_of = |id: &str| {
        graph
            .node_indices
            .get(id)
            .map(|&idx| graph.node(idx).key.clone())
            .unwrap_or_else(|| id.to_string())
    };
    let keys = |ids: &[String]| ids.iter().map(|id| key_of(id.as_str())).collect::<Vec<_>>().join(", ");

    let mut warnings = Vec::new();
    if !analysis.isolated.is_empty() {
        warnings.push(Diagnostic::new(
            "W001",
            Kind::Isolated,
            format!(
                "Workflow has {} isolated node(s) with no connections: {}",
                analysis.isolated.len(),
                keys(&analysis.isolated)
            ),
        ));
    }
    if !analysis.unreachable.is_empty() {
        warnings.push(Diagnostic::new(
            "W002",
            Kind::Unreachable,
            format!(
                "Workflow has {} node(s) unreachable from any entry node: {}",
                analysis.unreachable.len(),
                keys(&analysis.unreachable)
            ),
        ));
    }
    for cycle in &analysis.cycles {
        let mut path: Vec<String> = cycle.iter().map(|id| key_of(id.as_str())).collect();
        if let Some(first) = path.first().cloned() {
            path.push(first);
        }
        warnings.push(Diagnostic::new(
            "W003",
            Kind::Cycle,
            format!("Cycle detected: {}", path.join(" -> ")),
        ));
    }
    warnings
}
