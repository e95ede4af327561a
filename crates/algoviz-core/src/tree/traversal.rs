use std::fmt;

use serde::Serialize;

use super::{NodeRef, NodeValue, TreeAction, TreeNode, TreeStep, TreeSummary, TreeTrace};
use crate::trace::{Trace, TraceBuilder};

/// Where a node's own visit falls relative to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Node, left, right.
    Preorder,
    /// Left, node, right.
    Inorder,
    /// Left, right, node.
    Postorder,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Preorder => "Preorder",
            TraversalOrder::Inorder => "Inorder",
            TraversalOrder::Postorder => "Postorder",
        };
        f.write_str(name)
    }
}

struct Walker<'t> {
    root: Option<&'t TreeNode>,
    order: TraversalOrder,
    visited: Vec<NodeValue>,
    trace: TraceBuilder<TreeStep>,
}

impl Walker<'_> {
    fn record(&mut self, action: TreeAction, message: String, current: Option<&TreeNode>, next: Option<&TreeNode>) {
        self.trace.record(TreeStep {
            action,
            message,
            current_node: current.map(NodeRef::from),
            next_node: next.map(NodeRef::from),
            tree: self.root.cloned(),
        });
    }

    fn reach(&mut self, node: &TreeNode) {
        self.visited.push(node.val.clone());
        self.record(
            TreeAction::Reach,
            format!("Reached node {}", node.val),
            Some(node),
            Some(node),
        );
    }

    fn descend(&mut self, node: &TreeNode, child: &TreeNode, action: TreeAction) {
        let side = if action == TreeAction::TravellingLeft { "left" } else { "right" };
        self.record(
            action,
            format!("Travelling {} from {} to {}", side, node.val, child.val),
            Some(node),
            Some(child),
        );
        self.walk(child);
        self.record(
            TreeAction::TravellingUp,
            format!("Travelling up from {} to {}", child.val, node.val),
            Some(child),
            Some(node),
        );
    }

    fn walk(&mut self, node: &TreeNode) {
        if self.order == TraversalOrder::Preorder {
            self.reach(node);
        }
        if let Some(left) = node.left.as_deref() {
            self.descend(node, left, TreeAction::TravellingLeft);
        }
        if self.order == TraversalOrder::Inorder {
            self.reach(node);
        }
        if let Some(right) = node.right.as_deref() {
            self.descend(node, right, TreeAction::TravellingRight);
        }
        if self.order == TraversalOrder::Postorder {
            self.reach(node);
        }
    }
}

/// Recursive depth-first traversal in `order`. An empty tree yields `START`
/// and `COMPLETED` only.
pub fn traverse(root: Option<&TreeNode>, order: TraversalOrder) -> TreeTrace {
    let mut walker = Walker {
        root,
        order,
        visited: Vec::new(),
        trace: TraceBuilder::new(),
    };
    walker.record(
        TreeAction::Start,
        format!("Starting {} traversal", order),
        None,
        None,
    );
    if let Some(node) = root {
        walker.walk(node);
    }

    let Walker { visited, trace, .. } = walker;
    let listed: Vec<String> = visited.iter().map(ToString::to_string).collect();
    let completed = TreeStep {
        action: TreeAction::Completed,
        message: format!("{} traversal completed: [{}]", order, listed.join(", ")),
        current_node: None,
        next_node: None,
        tree: root.cloned(),
    };
    Trace::new(trace.finish(completed), TreeSummary { order: visited })
}

pub fn preorder(root: Option<&TreeNode>) -> TreeTrace {
    traverse(root, TraversalOrder::Preorder)
}

pub fn inorder(root: Option<&TreeNode>) -> TreeTrace {
    traverse(root, TraversalOrder::Inorder)
}

pub fn postorder(root: Option<&TreeNode>) -> TreeTrace {
    traverse(root, TraversalOrder::Postorder)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn leaf(v: i64) -> TreeNode {
        TreeNode::leaf(v)
    }

    /// `{2, left: {3, right: {4}}, right: {1}}`
    fn sample() -> TreeNode {
        leaf(2)
            .with_left(leaf(3).with_right(leaf(4)))
            .with_right(leaf(1))
    }

    fn reached(trace: &TreeTrace) -> Vec<NodeValue> {
        trace
            .steps
            .iter()
            .filter(|s| s.action == TreeAction::Reach)
            .filter_map(|s| s.current_node.as_ref().map(|n| n.val.clone()))
            .collect()
    }

    fn ints(values: &[i64]) -> Vec<NodeValue> {
        values.iter().copied().map(NodeValue::Int).collect()
    }

    #[test]
    fn inorder_reach_sequence() {
        let tree = sample();
        let trace = inorder(Some(&tree));
        assert_eq!(reached(&trace), ints(&[3, 4, 2, 1]));
        assert_eq!(trace.summary.order, ints(&[3, 4, 2, 1]));
    }

    #[test]
    fn preorder_and_postorder_sequences() {
        let tree = sample();
        assert_eq!(reached(&preorder(Some(&tree))), ints(&[2, 3, 4, 1]));
        assert_eq!(reached(&postorder(Some(&tree))), ints(&[4, 3, 1, 2]));
    }

    #[test]
    fn edges_are_walked_down_then_up() {
        let tree = leaf(1).with_left(leaf(0));
        let trace = inorder(Some(&tree));
        assert_eq!(
            trace.tags(),
            vec!["START", "TRAVELLING_LEFT", "REACH", "TRAVELLING_UP", "REACH", "COMPLETED"]
        );
        let up = &trace.steps[3];
        assert_eq!(up.current_node.as_ref().map(|n| &n.val), Some(&NodeValue::Int(0)));
        assert_eq!(up.next_node.as_ref().map(|n| &n.val), Some(&NodeValue::Int(1)));
    }

    #[test]
    fn every_step_carries_the_whole_tree() {
        let tree = sample();
        let trace = postorder(Some(&tree));
        assert!(trace.steps.iter().all(|s| s.tree.as_ref() == Some(&tree)));
    }

    #[test]
    fn empty_tree() {
        let trace = preorder(None);
        assert_eq!(trace.tags(), vec!["START", "COMPLETED"]);
        assert!(trace.summary.order.is_empty());
    }

    fn arb_tree() -> impl Strategy<Value = TreeNode> {
        let leaves = (0i64..100).prop_map(leaf);
        leaves.prop_recursive(5, 32, 2, |inner| {
            (
                0i64..100,
                prop::option::of(inner.clone()),
                prop::option::of(inner),
            )
                .prop_map(|(val, left, right)| TreeNode {
                    val: NodeValue::Int(val),
                    left: left.map(Box::new),
                    right: right.map(Box::new),
                })
        })
    }

    fn reference(node: Option<&TreeNode>, order: TraversalOrder, out: &mut Vec<NodeValue>) {
        let Some(node) = node else { return };
        if order == TraversalOrder::Preorder {
            out.push(node.val.clone());
        }
        reference(node.left.as_deref(), order, out);
        if order == TraversalOrder::Inorder {
            out.push(node.val.clone());
        }
        reference(node.right.as_deref(), order, out);
        if order == TraversalOrder::Postorder {
            out.push(node.val.clone());
        }
    }

    proptest! {
        #[test]
        fn reach_order_matches_textbook(tree in arb_tree()) {
            for order in [TraversalOrder::Preorder, TraversalOrder::Inorder, TraversalOrder::Postorder] {
                let trace = traverse(Some(&tree), order);
                let mut expected = Vec::new();
                reference(Some(&tree), order, &mut expected);
                prop_assert_eq!(reached(&trace), expected);
                prop_assert_eq!(trace.summary.order.len(), tree.node_count());
            }
        }

        #[test]
        fn every_edge_is_walked_twice(tree in arb_tree()) {
            let trace = inorder(Some(&tree));
            let stats = trace.stats();
            let edges = tree.node_count() - 1;
            prop_assert_eq!(
                stats.count("TRAVELLING_LEFT") + stats.count("TRAVELLING_RIGHT"),
                edges
            );
            prop_assert_eq!(stats.count("TRAVELLING_UP"), edges);
        }
    }
}
