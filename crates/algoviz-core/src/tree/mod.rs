//! Binary tree traversal engines.
//!
//! Trees are owned `Box` chains, so the input cannot contain cycles. Every
//! step carries a clone of the whole tree plus value-only references to the
//! active edge's endpoints.

mod traversal;

pub use traversal::{inorder, postorder, preorder, traverse, TraversalOrder};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::trace::{StepEvent, Trace};

/// A node label as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Int(v) => write!(f, "{}", v),
            NodeValue::Float(v) => write!(f, "{}", v),
            NodeValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for NodeValue {
    fn from(v: i64) -> Self {
        NodeValue::Int(v)
    }
}

impl From<&str> for NodeValue {
    fn from(v: &str) -> Self {
        NodeValue::Text(v.to_string())
    }
}

/// `{ val, left, right }`; absent or `null` children are leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub val: NodeValue,
    #[serde(default)]
    pub left: Option<Box<TreeNode>>,
    #[serde(default)]
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(val: impl Into<NodeValue>) -> Self {
        TreeNode {
            val: val.into(),
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, child: TreeNode) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    pub fn with_right(mut self, child: TreeNode) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        let count = |child: &Option<Box<TreeNode>>| child.as_ref().map_or(0, |n| n.node_count());
        1 + count(&self.left) + count(&self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreeAction {
    Start,
    TravellingLeft,
    TravellingRight,
    TravellingUp,
    Reach,
    Completed,
}

impl TreeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TreeAction::Start => "START",
            TreeAction::TravellingLeft => "TRAVELLING_LEFT",
            TreeAction::TravellingRight => "TRAVELLING_RIGHT",
            TreeAction::TravellingUp => "TRAVELLING_UP",
            TreeAction::Reach => "REACH",
            TreeAction::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRef {
    pub val: NodeValue,
}

impl From<&TreeNode> for NodeRef {
    fn from(node: &TreeNode) -> Self {
        NodeRef {
            val: node.val.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStep {
    pub action: TreeAction,
    pub message: String,
    pub current_node: Option<NodeRef>,
    pub next_node: Option<NodeRef>,
    pub tree: Option<TreeNode>,
}

impl StepEvent for TreeStep {
    fn tag(&self) -> &'static str {
        self.action.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSummary {
    /// Node values in visit order.
    pub order: Vec<NodeValue>,
}

pub type TreeTrace = Trace<TreeStep, TreeSummary>;
