//! Feature-name lookup
//!
//! Leaves carry a sentinel feature index, so a lookup miss is an expected
//! event and resolves to a fallback instead of an error.

use serde::{Deserialize, Serialize};

/// Mapping from feature index to display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureNames {
    names: Vec<String>,
}

impl FeatureNames {
    pub fn new(names: Vec<String>) -> Self {
        FeatureNames { names }
    }

    /// Exact lookup. `None` for negative or out-of-range indices.
    pub fn get(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// Lookup with a caller-chosen fallback.
    pub fn name_or<'a>(&'a self, index: i64, fallback: &'a str) -> &'a str {
        self.get(index).unwrap_or(fallback)
    }

    /// Lookup falling back to the empty string.
    pub fn name(&self, index: i64) -> &str {
        self.name_or(index, "")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for FeatureNames {
    fn from(names: Vec<String>) -> Self {
        FeatureNames::new(names)
    }
}

impl<'a> FromIterator<&'a str> for FeatureNames {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        FeatureNames::new(iter.into_iter().map(str::to_owned).collect())
    }
}
