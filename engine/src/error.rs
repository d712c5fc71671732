//! Error types for tree flattening
//!
//! Two classes of failure abort a flattening pass:
//! - input validation (nothing to flatten, or column arrays that disagree)
//! - structural integrity (the node array does not encode a binary tree)
//!
//! Missing feature names are not errors; see [`crate::features::FeatureNames`].

use crate::node::{NodeId, Side};

/// The node array does not describe a single binary tree rooted at index 0.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("node {node} has a {slot} child but no {missing} child", missing = .slot.other())]
    MissingChild { node: NodeId, slot: Side },

    #[error("node {node} references {slot} child {child} but tree has {num_nodes} nodes")]
    ChildOutOfRange {
        node: NodeId,
        slot: Side,
        child: i64,
        num_nodes: usize,
    },

    #[error("node {node} uses node {child} as both children")]
    DuplicateChild { node: NodeId, child: NodeId },

    #[error("node {node} references child {child} which precedes it in the node array")]
    ChildBeforeParent { node: NodeId, child: NodeId },

    #[error("node {child} is a child of both node {owner} and node {node}")]
    ChildAlreadyClaimed {
        node: NodeId,
        child: NodeId,
        owner: NodeId,
    },

    #[error("node {node} is not reachable from the root")]
    UnreachableNode { node: NodeId },
}

/// Error returned by [`crate::flatten::flatten`] and the tree constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlattenError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("column {field} has {actual} entries, expected {expected}")]
    ArrayLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("malformed tree: {0}")]
    Structure(#[from] StructureError),
}

impl FlattenError {
    /// True for structural-integrity failures, false for input-validation ones.
    pub fn is_structural(&self) -> bool {
        matches!(self, FlattenError::Structure(_))
    }
}
