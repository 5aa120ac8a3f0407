//! Static node-type metadata: category and outcome vocabulary.
//!
//! SYNC NOTE: `NodeType` is a closed set. Adding a variant forces every
//! match below (and in `model::config`) to be revisited.

use serde::{Deserialize, Serialize};

/// Outcome labels a node may put on its outgoing connections.
pub mod outcome {
    pub const COMPLETED: &str = "Completed";
    pub const FAILED: &str = "Failed";
    pub const TRUE: &str = "True";
    pub const FALSE: &str = "False";
    pub const VALID: &str = "Valid";
    pub const INVALID: &str = "Invalid";
    pub const NEXT: &str = "Next";
    pub const JOINED: &str = "Joined";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Action,
    Condition,
    Validation,
    Split,
    Join,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    Action,
    Condition,
    Validation,
    Control,
}

impl NodeType {
    pub fn category(self) -> NodeCategory {
        match self {
            NodeType::Action => NodeCategory::Action,
            NodeType::Condition => NodeCategory::Condition,
            NodeType::Validation => NodeCategory::Validation,
            NodeType::Split | NodeType::Join => NodeCategory::Control,
        }
    }

    pub fn is_control(self) -> bool {
        self.category() == NodeCategory::Control
    }

    /// Every label a node of this type may emit.
    pub fn allowed_outcomes(self) -> &'static [&'static str] {
        match self {
            NodeType::Action => &[outcome::COMPLETED, outcome::FAILED],
            NodeType::Condition => &[outcome::TRUE, outcome::FALSE],
            NodeType::Validation => &[outcome::VALID, outcome::INVALID],
            NodeType::Split => &[outcome::NEXT],
            NodeType::Join => &[outcome::JOINED],
        }
    }

    /// Labels that must each appear on at least one outgoing connection.
    ///
    /// Identical to the allowed set for every type. For Control types the
    /// shape is enforced by `validate::control`, not by the outcome rules.
    pub fn required_outcomes(self) -> &'static [&'static str] {
        self.allowed_outcomes()
    }

    pub fn allows_outcome(self, label: &str) -> bool {
        self.allowed_outcomes().contains(&label)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Action => "Action",
            NodeType::Condition => "Condition",
            NodeType::Validation => "Validation",
            NodeType::Split => "Split",
            NodeType::Join => "Join",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_types_are_split_and_join() {
        assert!(NodeType::Split.is_control());
        assert!(NodeType::Join.is_control());
        assert!(!NodeType::Action.is_control());
        assert!(!NodeType::Condition.is_control());
        assert!(!NodeType::Validation.is_control());
    }

    #[test]
    fn action_requires_completed_and_failed() {
        assert_eq!(
            NodeType::Action.required_outcomes(),
            &[outcome::COMPLETED, outcome::FAILED]
        );
    }

    #[test]
    fn control_types_have_a_single_label() {
        assert_eq!(NodeType::Split.allowed_outcomes(), &[outcome::NEXT]);
        assert_eq!(NodeType::Join.allowed_outcomes(), &[outcome::JOINED]);
        assert!(!NodeType::Split.allows_outcome(outcome::COMPLETED));
    }

    #[test]
    fn unknown_type_fails_to_deserialize() {
        let parsed = serde_json::from_str::<NodeType>("\"Loop\"");
        assert!(parsed.is_err());
    }
}
