//! Diagnostics produced by validation, and the hard errors of loading and compiling.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Kind {
    // Errors
    Parse,
    NotFound,
    Structural,
    Config,
    Outcome,
    ControlNode,
    GraphTopology,

    // Warnings
    Isolated,
    Unreachable,
    Cycle,
}

impl Kind {
    pub fn is_warning(self) -> bool {
        matches!(self, Kind::Isolated | Kind::Unreachable | Kind::Cycle)
    }
}

/// A single validation finding. Whether it is an error or a warning
/// follows from its `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: &'static str,
    pub kind: Kind,
    pub message: String,
    pub node_key: Option<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Diagnostic {
    pub fn new(code: &'static str, kind: Kind, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            kind,
            message: message.into(),
            node_key: None,
        }
    }

    pub fn at_node(mut self, key: &str) -> Self {
        self.node_key = Some(key.to_string());
        self
    }

    pub fn structural(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, Kind::Structural, message)
    }

    pub fn config(code: &'static str, message: impl Into<String>, node_key: &str) -> Self {
        Self::new(code, Kind::Config, message).at_node(node_key)
    }

    pub fn outcome(code: &'static str, message: impl Into<String>, node_key: &str) -> Self {
        Self::new(code, Kind::Outcome, message).at_node(node_key)
    }

    pub fn control(code: &'static str, message: impl Into<String>, node_key: &str) -> Self {
        Self::new(code, Kind::ControlNode, message).at_node(node_key)
    }

    pub fn topology(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, Kind::GraphTopology, message)
    }
}

/// Failure to obtain a snapshot from the repository collaborator.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),

    #[error("malformed workflow snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("workflow version '{0}' not found")]
    NotFound(String),

    #[error("workflow version '{id}' has status {status}; only Published versions can be compiled")]
    NotPublished { id: String, status: String },

    #[error("failed to load workflow version '{id}': {source}")]
    Repository {
        id: String,
        #[source]
        source: RepositoryError,
    },
}

/// Why a node's configuration text was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("configuration does not match the {node_type} schema ({expected}): {source}")]
    Invalid {
        node_type: &'static str,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("maxParallelism must be a positive integer, got {0}")]
    NonPositiveParallelism(u64),
}
