//! Hardcoded test trees for flattening validation
//!
//! Nodes are pushed in ID order so that `tree.nodes[id]` is the node with that
//! id. Unless stated otherwise the layout is pre-order (left subtree written
//! before the right sibling), which is what depth-first tree builders emit.

use crate::features::FeatureNames;
use crate::node::{DecisionTree, TreeNode};

/// A tree that never split: one leaf root holding all 10 samples.
pub fn build_single_leaf() -> DecisionTree {
    DecisionTree::from(vec![TreeNode::leaf(10)])
}

/// One split on feature 0 at 1.5.
///
/// Tree structure:
///   0: f0 <= 1.5   [1, 2]   n=10
///   1: leaf               n=4
///   2: leaf               n=6
pub fn build_stump() -> DecisionTree {
    DecisionTree::from(vec![
        TreeNode::split(0, 1.5, 1, 2, 10),
        TreeNode::leaf(4),
        TreeNode::leaf(6),
    ])
}

/// Root split whose right subtree splits again.
///
/// Tree structure:
///   0: f0 <= 2.5   [1, 2]   n=100
///   1: leaf               n=40
///   2: f1 <= 0.75  [3, 4]   n=60
///   3: leaf               n=25
///   4: leaf               n=35
pub fn build_three_level_tree() -> DecisionTree {
    DecisionTree::from(vec![
        TreeNode::split(0, 2.5, 1, 2, 100),
        TreeNode::leaf(40),
        TreeNode::split(1, 0.75, 3, 4, 60),
        TreeNode::leaf(25),
        TreeNode::leaf(35),
    ])
}

/// Same shape as [`build_three_level_tree`] but with every internal node
/// split, laid out breadth-first instead of pre-order.
///
/// Tree structure:
///   0: a <= 1.0    [1, 2]   n=16
///   1: b <= 2.0    [3, 4]   n=7
///   2: c <= 3.0    [5, 6]   n=9
///   3..6: leaves          n=3, 4, 5, 4
pub fn build_breadth_first_tree() -> DecisionTree {
    DecisionTree::from(vec![
        TreeNode::split(0, 1.0, 1, 2, 16),
        TreeNode::split(1, 2.0, 3, 4, 7),
        TreeNode::split(2, 3.0, 5, 6, 9),
        TreeNode::leaf(3),
        TreeNode::leaf(4),
        TreeNode::leaf(5),
        TreeNode::leaf(4),
    ])
}

/// Feature names for [`build_iris_tree`].
pub fn iris_feature_names() -> FeatureNames {
    [
        "sepal length (cm)",
        "sepal width (cm)",
        "petal length (cm)",
        "petal width (cm)",
    ]
    .into_iter()
    .collect()
}

/// Depth-3 classifier on the iris measurements.
///
/// Tree structure:
///   0: petal length <= 2.45  [1, 2]   n=150
///   1: leaf                         n=50
///   2: petal width <= 1.75   [3, 6]   n=100
///   3: petal length <= 4.95  [4, 5]   n=54
///   4: leaf                         n=48
///   5: leaf                         n=6
///   6: petal length <= 4.85  [7, 8]   n=46
///   7: leaf                         n=3
///   8: leaf                         n=43
pub fn build_iris_tree() -> DecisionTree {
    DecisionTree::from(vec![
        TreeNode::split(2, 2.45, 1, 2, 150),
        TreeNode::leaf(50),
        TreeNode::split(3, 1.75, 3, 6, 100),
        TreeNode::split(2, 4.95, 4, 5, 54),
        TreeNode::leaf(48),
        TreeNode::leaf(6),
        TreeNode::split(2, 4.85, 7, 8, 46),
        TreeNode::leaf(3),
        TreeNode::leaf(43),
    ])
}

/// Complete binary tree of the given depth in breadth-first layout.
///
/// Node `i` has children `2i + 1` and `2i + 2`; every leaf holds one sample,
/// so each node's sample count is the number of leaves below it. Splits at
/// level `l` use feature `l`.
pub fn build_complete_tree(depth: u32) -> DecisionTree {
    let num_nodes = (1usize << (depth + 1)) - 1;
    let first_leaf = (1usize << depth) - 1;
    let nodes = (0..num_nodes)
        .map(|i| {
            let level = usize::BITS - 1 - (i + 1).leading_zeros();
            let samples = 1u64 << (depth - level);
            if i >= first_leaf {
                TreeNode::leaf(samples)
            } else {
                TreeNode::split(level as i64, i as f64 * 0.5, 2 * i + 1, 2 * i + 2, samples)
            }
        })
        .collect();
    DecisionTree { nodes }
}
