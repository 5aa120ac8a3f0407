//! Per-node configuration validation (N001–N003).

use crate::error::{ConfigError, Diagnostic};
use crate::model::{Node, NodeConfig};

/// Validate a single node's config. Returns all errors found.
pub fn validate_node_config(node: &Node) -> Vec<Diagnostic> {
    match NodeConfig::parse(node.node_type, node.config.as_deref()) {
        Ok(_) => Vec::new(),
        Err(err) => vec![config_error(node, &err)],
    }
}

fn config_error(node: &Node, err: &ConfigError) -> Diagnostic {
    let code = match err {
        ConfigError::Malformed(_) => "N001",
        ConfigError::Invalid { node_type: "Join", .. } => "N003",
        ConfigError::Invalid { .. } | ConfigError::NonPositiveParallelism(_) => "N002",
    };
    Diagnostic::config(
        code,
        format!("Node '{}' ({}) has invalid configuration: {}", node.key, node.node_type, err),
        &node.key,
    )
}
