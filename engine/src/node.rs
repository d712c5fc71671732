//! Node definitions for the decision tree
//!
//! A trained binary tree arrives as a flat array of nodes that reference each
//! other by position. Nodes are read-only input: nothing in this crate mutates
//! them after construction.

use serde::{Deserialize, Serialize};

use crate::error::FlattenError;

/// Node ID type (index into flat array storage)
pub type NodeId = usize;

/// Child index marking "no child". A node whose children are both
/// `TREE_LEAF` is a leaf.
pub const TREE_LEAF: i64 = -1;

/// Feature index stored on leaves, where the feature is meaningless.
pub const TREE_UNDEFINED: i64 = -2;

/// Branch of a split: `x <= threshold` goes left, `x > threshold` right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The sibling branch
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// One entry of the node array.
///
/// Field names follow the column names tree builders commonly export, so a
/// JSON array of node records deserializes directly. Extra columns such as
/// `impurity` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Index of the left child, or `TREE_LEAF`
    pub left_child: i64,
    /// Index of the right child, or `TREE_LEAF`
    pub right_child: i64,
    /// Index into the feature-name table (meaningless for leaves)
    pub feature: i64,
    /// Split boundary; samples with `x <= threshold` go left
    pub threshold: f64,
    /// Training observations reaching this node
    pub n_node_samples: u64,
}

impl TreeNode {
    /// Create a split node
    pub fn split(feature: i64, threshold: f64, left: NodeId, right: NodeId, n_node_samples: u64) -> Self {
        TreeNode {
            left_child: left as i64,
            right_child: right as i64,
            feature,
            threshold,
            n_node_samples,
        }
    }

    /// Create a leaf node
    pub fn leaf(n_node_samples: u64) -> Self {
        TreeNode {
            left_child: TREE_LEAF,
            right_child: TREE_LEAF,
            feature: TREE_UNDEFINED,
            threshold: TREE_UNDEFINED as f64,
            n_node_samples,
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.left_child == TREE_LEAF && self.right_child == TREE_LEAF
    }
}

/// Decision tree wrapper
///
/// Contains a flat array of nodes; the root is at index 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Flat array of nodes indexed by NodeId
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        DecisionTree { nodes: Vec::new() }
    }

    /// Build a tree from parallel column arrays, one entry per node.
    ///
    /// All columns must have the same length as `children_left`.
    pub fn from_arrays(
        children_left: &[i64],
        children_right: &[i64],
        feature: &[i64],
        threshold: &[f64],
        n_node_samples: &[u64],
    ) -> Result<Self, FlattenError> {
        let expected = children_left.len();
        let lengths = [
            ("children_right", children_right.len()),
            ("feature", feature.len()),
            ("threshold", threshold.len()),
            ("n_node_samples", n_node_samples.len()),
        ];
        for (field, actual) in lengths {
            if actual != expected {
                return Err(FlattenError::ArrayLengthMismatch { field, expected, actual });
            }
        }

        let nodes = (0..expected)
            .map(|i| TreeNode {
                left_child: children_left[i],
                right_child: children_right[i],
                feature: feature[i],
                threshold: threshold[i],
                n_node_samples: n_node_samples[i],
            })
            .collect();
        Ok(DecisionTree { nodes })
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// Get the root node, if any
    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of split (non-leaf) nodes
    pub fn n_splits(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_leaf()).count()
    }

    /// Number of leaf nodes
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }
}

impl From<Vec<TreeNode>> for DecisionTree {
    fn from(nodes: Vec<TreeNode>) -> Self {
        DecisionTree { nodes }
    }
}
