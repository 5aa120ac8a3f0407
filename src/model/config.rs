//! Typed node configuration, keyed by node type.
//! SYNC NOTE: Match arms here must track `NodeType` in `catalog.rs`.

use serde::{Deserialize, Serialize};

use crate::catalog::NodeType;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeConfig {
    Split(SplitConfig),
    Join(JoinConfig),
    /// Action, Condition and Validation nodes carry free-form configuration.
    Task { value: serde_json::Value },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitConfig {
    #[serde(default)]
    pub max_parallelism: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinConfig {
    #[serde(default)]
    pub join_type: Option<JoinType>,
    #[serde(default)]
    pub cancel_remaining: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    All,
    Any,
}

impl NodeConfig {
    /// Interpret raw configuration text for a node of `node_type`.
    ///
    /// Returns `Ok(None)` when the text is absent or blank.
    pub fn parse(node_type: NodeType, raw: Option<&str>) -> Result<Option<NodeConfig>, ConfigError> {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(None);
        };

        let value: serde_json::Value = serde_json::from_str(raw).map_err(ConfigError::Malformed)?;

        let config = match node_type {
            NodeType::Split => {
                let split: SplitConfig =
                    serde_json::from_value(value).map_err(|source| ConfigError::Invalid {
                        node_type: "Split",
                        expected: "maxParallelism must be a positive integer",
                        source,
                    })?;
                if split.max_parallelism == Some(0) {
                    return Err(ConfigError::NonPositiveParallelism(0));
                }
                NodeConfig::Split(split)
            }
            NodeType::Join => {
                let join: JoinConfig =
                    serde_json::from_value(value).map_err(|source| ConfigError::Invalid {
                        node_type: "Join",
                        expected: "joinType must be 'All' or 'Any', cancelRemaining must be a boolean",
                        source,
                    })?;
                NodeConfig::Join(join)
            }
            NodeType::Action | NodeType::Condition | NodeType::Validation => {
                NodeConfig::Task { value }
            }
        };

        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_blank_config_is_none() {
        assert_eq!(NodeConfig::parse(NodeType::Split, None).unwrap(), None);
        assert_eq!(NodeConfig::parse(NodeType::Join, Some("   ")).unwrap(), None);
    }

    #[test]
    fn malformed_json_is_rejected_for_every_type() {
        let err = NodeConfig::parse(NodeType::Action, Some("{not json")).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn split_parallelism_must_be_positive() {
        let ok = NodeConfig::parse(NodeType::Split, Some(r#"{"maxParallelism": 4}"#)).unwrap();
        assert_eq!(
            ok,
            Some(NodeConfig::Split(SplitConfig {
                max_parallelism: Some(4)
            }))
        );

        let zero = NodeConfig::parse(NodeType::Split, Some(r#"{"maxParallelism": 0}"#)).unwrap_err();
        assert!(matches!(zero, ConfigError::NonPositiveParallelism(0)));

        let text = NodeConfig::parse(NodeType::Split, Some(r#"{"maxParallelism": "four"}"#)).unwrap_err();
        assert!(matches!(text, ConfigError::Invalid { node_type: "Split", .. }));

        let fraction = NodeConfig::parse(NodeType::Split, Some(r#"{"maxParallelism": 2.5}"#)).unwrap_err();
        assert!(matches!(fraction, ConfigError::Invalid { .. }));

        let negative = NodeConfig::parse(NodeType::Split, Some(r#"{"maxParallelism": -3}"#)).unwrap_err();
        assert!(matches!(negative, ConfigError::Invalid { node_type: "Split", .. }));
    }

    #[test]
    fn split_parallelism_beyond_signed_range_is_accepted() {
        let big = NodeConfig::parse(
            NodeType::Split,
            Some(r#"{"maxParallelism": 9223372036854775808}"#),
        )
        .unwrap();
        assert_eq!(
            big,
            Some(NodeConfig::Split(SplitConfig {
                max_parallelism: Some(9_223_372_036_854_775_808)
            }))
        );
    }

    #[test]
    fn join_type_is_exactly_all_or_any() {
        let ok = NodeConfig::parse(
            NodeType::Join,
            Some(r#"{"joinType": "Any", "cancelRemaining": true}"#),
        )
        .unwrap();
        assert_eq!(
            ok,
            Some(NodeConfig::Join(JoinConfig {
                join_type: Some(JoinType::Any),
                cancel_remaining: Some(true),
            }))
        );

        assert!(NodeConfig::parse(NodeType::Join, Some(r#"{"joinType": "all"}"#)).is_err());
        assert!(NodeConfig::parse(NodeType::Join, Some(r#"{"cancelRemaining": "yes"}"#)).is_err());
    }

    #[test]
    fn task_types_accept_any_json() {
        let parsed = NodeConfig::parse(NodeType::Condition, Some("[1, 2, 3]")).unwrap();
        assert!(matches!(parsed, Some(NodeConfig::Task { .. })));
    }
}
