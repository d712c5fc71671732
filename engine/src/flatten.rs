//! Tree-to-hierarchy flattening
//!
//! Every split node contributes two [`SplitRecord`]s, one per child edge.
//! Records are linked through `parent_id`, which holds the `split_id` of the
//! edge leading into the split node (empty for the root's edges), so the
//! record set forms a single tree that a hierarchical chart can consume.
//!
//! The pass is a single scan over the node array in index order. State that
//! the scan threads through (the id counter, the child -> incoming edge table
//! and the output) lives in a [`Flattener`] owned by one call.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{FlattenError, StructureError};
use crate::features::FeatureNames;
use crate::node::{DecisionTree, NodeId, Side, TreeNode, TREE_LEAF};

const ROOT: NodeId = 0;

/// One child edge of one split node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitRecord {
    /// `split_id` of the edge leading into the split node; empty at the root
    pub parent_id: String,
    /// Unique id of this edge, assigned in visitation order
    pub split_id: String,
    /// Boundary description, e.g. `"age <= 42.50"`
    pub label: String,
    /// Samples reaching the child this edge leads to
    pub value: u64,
    /// Feature the parent node splits on
    pub category: String,
}

impl SplitRecord {
    /// True for the edges leaving the tree root.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }
}

impl Side {
    /// Render the boundary label. Thresholds always use two fixed decimals;
    /// non-finite ones print as `nan`, `inf` or `-inf`.
    pub fn label(self, feature: &str, threshold: f64) -> String {
        let threshold = if threshold.is_nan() {
            "nan".to_owned()
        } else {
            format!("{threshold:.2}")
        };
        match self {
            Side::Left => format!("{feature} <= {threshold}"),
            Side::Right => format!("{feature} > {threshold}"),
        }
    }
}

/// Where a node was attached as a child.
#[derive(Debug, Clone, Copy)]
struct Incoming {
    parent: NodeId,
    edge: usize,
}

/// Accumulator for a single flattening pass.
struct Flattener<'a> {
    nodes: &'a [TreeNode],
    names: &'a FeatureNames,
    /// Next unused split id; advances by 2 per split node
    next_id: usize,
    /// incoming[i] is set once node i has been claimed as a child
    incoming: Vec<Option<Incoming>>,
    records: Vec<SplitRecord>,
}

impl<'a> Flattener<'a> {
    fn new(nodes: &'a [TreeNode], names: &'a FeatureNames) -> Self {
        Flattener {
            nodes,
            names,
            next_id: 0,
            incoming: vec![None; nodes.len()],
            // A valid tree has exactly one incoming edge per non-root node
            records: Vec::with_capacity(nodes.len().saturating_sub(1)),
        }
    }

    fn run(mut self) -> Result<Vec<SplitRecord>, StructureError> {
        let nodes = self.nodes;
        for (idx, node) in nodes.iter().enumerate() {
            self.visit(idx, node)?;
        }
        Ok(self.records)
    }

    fn visit(&mut self, idx: NodeId, node: &TreeNode) -> Result<(), StructureError> {
        // Parents always precede children, so every claim on `idx` has been made
        let incoming = self.incoming[idx];
        if idx != ROOT && incoming.is_none() {
            return Err(StructureError::UnreachableNode { node: idx });
        }
        if node.is_leaf() {
            return Ok(());
        }

        if node.left_child == TREE_LEAF {
            return Err(StructureError::MissingChild { node: idx, slot: Side::Right });
        }
        if node.right_child == TREE_LEAF {
            return Err(StructureError::MissingChild { node: idx, slot: Side::Left });
        }
        let left = self.check_child(idx, Side::Left, node.left_child)?;
        let right = self.check_child(idx, Side::Right, node.right_child)?;
        if left == right {
            return Err(StructureError::DuplicateChild { node: idx, child: left });
        }

        let parent_id = incoming.map(|e| e.edge.to_string()).unwrap_or_default();
        let names = self.names;
        let feature = names.name(node.feature);
        trace!(node = idx, feature, threshold = node.threshold, left, right, "split");

        let left_edge = self.next_id;
        let right_edge = left_edge + 1;
        self.next_id += 2;

        for (side, child, edge) in [(Side::Left, left, left_edge), (Side::Right, right, right_edge)] {
            self.records.push(SplitRecord {
                parent_id: parent_id.clone(),
                split_id: edge.to_string(),
                label: side.label(feature, node.threshold),
                value: self.nodes[child].n_node_samples,
                category: feature.to_owned(),
            });
            self.incoming[child] = Some(Incoming { parent: idx, edge });
        }
        Ok(())
    }

    /// Validate one child reference of split node `idx` without claiming it.
    fn check_child(&self, idx: NodeId, slot: Side, raw: i64) -> Result<NodeId, StructureError> {
        let child = usize::try_from(raw)
            .ok()
            .filter(|&c| c < self.nodes.len())
            .ok_or(StructureError::ChildOutOfRange {
                node: idx,
                slot,
                child: raw,
                num_nodes: self.nodes.len(),
            })?;
        if child <= idx {
            return Err(StructureError::ChildBeforeParent { node: idx, child });
        }
        if let Some(owner) = self.incoming[child] {
            return Err(StructureError::ChildAlreadyClaimed {
                node: idx,
                child,
                owner: owner.parent,
            });
        }
        Ok(child)
    }
}

/// Flatten a node array into split records.
///
/// Records come out in visitation order, left edge before right edge, with
/// `split_id`s `"0"`, `"1"`, ... Fails on an empty array or on any node array
/// that is not a binary tree rooted at index 0 whose parents are stored
/// before their children. No partial output is returned on failure.
pub fn flatten(nodes: &[TreeNode], names: &FeatureNames) -> Result<Vec<SplitRecord>, FlattenError> {
    if nodes.is_empty() {
        return Err(FlattenError::EmptyTree);
    }
    let records = Flattener::new(nodes, names).run()?;
    debug!(nodes = nodes.len(), records = records.len(), "flattened tree");
    Ok(records)
}

impl DecisionTree {
    /// Flatten this tree. See [`flatten`].
    pub fn flatten(&self, names: &FeatureNames) -> Result<Vec<SplitRecord>, FlattenError> {
        flatten(&self.nodes, names)
    }
}
