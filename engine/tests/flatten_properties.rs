//! Property-based tests for tree flattening.
//!
//! Random valid trees are grown from a stream of split decisions, laid out
//! either pre-order or breadth-first, and the record set is checked against
//! the tree it came from.

use std::collections::{HashMap, HashSet, VecDeque};

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use treeburst_engine::{flatten, DecisionTree, FeatureNames, NodeId, SplitRecord, TreeNode};

const MAX_DEPTH: usize = 8;

fn names() -> FeatureNames {
    // Fewer names than features used below, so some lookups miss
    ["alpha", "beta", "gamma"].into_iter().collect()
}

fn feature_for(idx: NodeId) -> i64 {
    ((idx * 7) % 5) as i64
}

fn threshold_for(thresholds: &[f64], idx: NodeId) -> f64 {
    thresholds[idx % thresholds.len()]
}

/// Pre-order layout: a node's left subtree is written before its right child.
fn grow_preorder(
    nodes: &mut Vec<TreeNode>,
    decisions: &mut impl Iterator<Item = bool>,
    thresholds: &[f64],
    depth: usize,
) -> NodeId {
    let idx = nodes.len();
    nodes.push(TreeNode::leaf(1));
    if depth < MAX_DEPTH && decisions.next().unwrap_or(false) {
        let left = grow_preorder(nodes, decisions, thresholds, depth + 1);
        let right = grow_preorder(nodes, decisions, thresholds, depth + 1);
        nodes[idx] = TreeNode::split(feature_for(idx), threshold_for(thresholds, idx), left, right, 0);
    }
    idx
}

/// Breadth-first layout: children are appended as their parent is expanded.
fn grow_breadth_first(decisions: &[bool], thresholds: &[f64]) -> Vec<TreeNode> {
    let mut nodes = vec![TreeNode::leaf(1)];
    let mut depth = vec![0usize];
    let mut queue = VecDeque::from([0usize]);
    let mut decisions = decisions.iter().copied();
    while let Some(idx) = queue.pop_front() {
        if depth[idx] < MAX_DEPTH && decisions.next().unwrap_or(false) {
            let left = nodes.len();
            nodes.push(TreeNode::leaf(1));
            nodes.push(TreeNode::leaf(1));
            depth.push(depth[idx] + 1);
            depth.push(depth[idx] + 1);
            nodes[idx] = TreeNode::split(feature_for(idx), threshold_for(thresholds, idx), left, left + 1, 0);
            queue.push_back(left);
            queue.push_back(left + 1);
        }
    }
    nodes
}

/// Give leaves their sample counts and sum them up into the splits.
fn assign_samples(nodes: &mut [TreeNode], leaf_samples: &[u64]) {
    for idx in (0..nodes.len()).rev() {
        let node = nodes[idx];
        nodes[idx].n_node_samples = if node.is_leaf() {
            leaf_samples[idx % leaf_samples.len()]
        } else {
            nodes[node.left_child as usize].n_node_samples + nodes[node.right_child as usize].n_node_samples
        };
    }
}

fn arb_tree() -> impl Strategy<Value = DecisionTree> {
    (
        prop_vec(any::<bool>(), 0..64),
        prop_vec(-1.0e6f64..1.0e6, 1..16),
        prop_vec(0u64..10_000, 1..16),
        any::<bool>(),
    )
        .prop_map(|(decisions, thresholds, leaf_samples, preorder)| {
            let mut nodes = if preorder {
                let mut nodes = Vec::new();
                grow_preorder(&mut nodes, &mut decisions.into_iter(), &thresholds, 0);
                nodes
            } else {
                grow_breadth_first(&decisions, &thresholds)
            };
            assign_samples(&mut nodes, &leaf_samples);
            DecisionTree::from(nodes)
        })
}

/// Map each non-root node to the record of the edge leading into it.
///
/// Split nodes emit their records in array order, two at a time.
fn incoming_records<'a>(tree: &DecisionTree, records: &'a [SplitRecord]) -> HashMap<NodeId, &'a SplitRecord> {
    let mut incoming = HashMap::new();
    let splits = tree.nodes.iter().filter(|n| !n.is_leaf());
    for (k, node) in splits.enumerate() {
        incoming.insert(node.left_child as usize, &records[2 * k]);
        incoming.insert(node.right_child as usize, &records[2 * k + 1]);
    }
    incoming
}

proptest! {
    #[test]
    fn two_records_per_split(tree in arb_tree()) {
        let records = flatten(&tree.nodes, &names()).unwrap();
        prop_assert_eq!(records.len(), 2 * tree.n_splits());
    }

    #[test]
    fn ids_unique_and_parents_resolve(tree in arb_tree()) {
        let records = flatten(&tree.nodes, &names()).unwrap();
        let ids: HashSet<&str> = records.iter().map(|r| r.split_id.as_str()).collect();
        prop_assert_eq!(ids.len(), records.len());
        for r in &records {
            prop_assert!(r.is_root() || ids.contains(r.parent_id.as_str()));
        }
    }

    #[test]
    fn ids_are_dense_in_order(tree in arb_tree()) {
        let records = flatten(&tree.nodes, &names()).unwrap();
        for (i, r) in records.iter().enumerate() {
            prop_assert_eq!(&r.split_id, &i.to_string());
        }
    }

    #[test]
    fn records_link_to_incoming_edge(tree in arb_tree()) {
        let names = names();
        let records = flatten(&tree.nodes, &names).unwrap();
        let incoming = incoming_records(&tree, &records);

        let splits = tree.nodes.iter().enumerate().filter(|(_, n)| !n.is_leaf());
        for (k, (idx, node)) in splits.enumerate() {
            let expected_parent = match idx {
                0 => String::new(),
                _ => incoming[&idx].split_id.clone(),
            };
            for (r, child) in [(&records[2 * k], node.left_child), (&records[2 * k + 1], node.right_child)] {
                prop_assert_eq!(&r.parent_id, &expected_parent);
                prop_assert_eq!(r.value, tree.nodes[child as usize].n_node_samples);
                prop_assert_eq!(r.category.as_str(), names.name(node.feature));
            }
            prop_assert!(records[2 * k].label.contains(" <= "));
            prop_assert!(records[2 * k + 1].label.contains(" > "));
        }
    }

    #[test]
    fn root_records_partition_root_samples(tree in arb_tree()) {
        let records = flatten(&tree.nodes, &names()).unwrap();
        if !records.is_empty() {
            let total: u64 = records.iter().filter(|r| r.is_root()).map(|r| r.value).sum();
            prop_assert_eq!(total, tree.nodes[0].n_node_samples);
        }
    }

    #[test]
    fn flatten_is_deterministic(tree in arb_tree()) {
        let names = names();
        prop_assert_eq!(flatten(&tree.nodes, &names).unwrap(), flatten(&tree.nodes, &names).unwrap());
    }

    #[test]
    fn labels_use_two_decimals(threshold in -1.0e12f64..1.0e12) {
        let tree = DecisionTree::from(vec![
            TreeNode::split(0, threshold, 1, 2, 2),
            TreeNode::leaf(1),
            TreeNode::leaf(1),
        ]);
        let records = flatten(&tree.nodes, &names()).unwrap();
        for r in &records {
            let number = r.label.rsplit(' ').next().unwrap();
            let decimals = number.split('.').nth(1).unwrap();
            prop_assert_eq!(decimals.len(), 2);
            prop_assert!(!number.contains('e'));
        }
    }
}
