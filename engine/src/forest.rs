//! Forest flattening
//!
//! Trees in an ensemble share nothing but the feature-name table, so each one
//! is flattened independently on the rayon pool. Each tree's pass is still the
//! single sequential scan from [`crate::flatten`].

use rayon::prelude::*;
use tracing::debug;

use crate::error::FlattenError;
use crate::features::FeatureNames;
use crate::flatten::SplitRecord;
use crate::node::DecisionTree;

/// A flattening failure inside one tree of a forest.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("tree {tree}: {source}")]
pub struct ForestError {
    /// Position of the failing tree in the input slice
    pub tree: usize,
    #[source]
    pub source: FlattenError,
}

/// Flatten every tree of a forest, in parallel.
///
/// Output order matches input order. If several trees fail, the error for the
/// lowest tree index is returned.
pub fn flatten_forest(trees: &[DecisionTree], names: &FeatureNames) -> Result<Vec<Vec<SplitRecord>>, ForestError> {
    let results: Vec<Result<Vec<SplitRecord>, FlattenError>> =
        trees.par_iter().map(|tree| tree.flatten(names)).collect();

    let mut forest = Vec::with_capacity(results.len());
    for (tree, result) in results.into_iter().enumerate() {
        forest.push(result.map_err(|source| ForestError { tree, source })?);
    }
    debug!(trees = forest.len(), "flattened forest");
    Ok(forest)
}
