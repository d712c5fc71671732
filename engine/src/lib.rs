//! treeburst Engine - Decision tree flattening
//!
//! This crate turns the flat, index-addressed node array of a trained binary
//! decision tree into parent-linked split records that a hierarchical chart
//! (sunburst, treemap) can consume directly.
//!
//! The engine is renderer-agnostic and has zero charting dependencies.

pub mod columns;
pub mod error;
pub mod features;
pub mod flatten;
pub mod forest;
pub mod node;
pub mod test_tree;

pub use columns::SplitColumns;
pub use error::{FlattenError, StructureError};
pub use features::FeatureNames;
pub use flatten::{flatten, SplitRecord};
pub use forest::{flatten_forest, ForestError};
pub use node::{DecisionTree, NodeId, Side, TreeNode, TREE_LEAF, TREE_UNDEFINED};
