//! Columnar view of split records
//!
//! Hierarchical chart libraries take one array per channel, all of equal
//! length. `SplitColumns` is that layout, in record order.

use serde::{Deserialize, Serialize};

use crate::flatten::SplitRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitColumns {
    /// `parent_id` of each record
    pub parents: Vec<String>,
    /// `split_id` of each record
    pub ids: Vec<String>,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// `category` of each record, the colour grouping key
    pub colors: Vec<String>,
}

impl SplitColumns {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// First column whose length differs from `ids`, with that length.
    pub fn misaligned(&self) -> Option<(&'static str, usize)> {
        let n = self.ids.len();
        [
            ("parents", self.parents.len()),
            ("labels", self.labels.len()),
            ("values", self.values.len()),
            ("colors", self.colors.len()),
        ]
        .into_iter()
        .find(|&(_, len)| len != n)
    }

    /// True when every column has the same length.
    pub fn is_aligned(&self) -> bool {
        self.misaligned().is_none()
    }
}

impl From<&[SplitRecord]> for SplitColumns {
    fn from(records: &[SplitRecord]) -> Self {
        let n = records.len();
        let mut columns = SplitColumns {
            parents: Vec::with_capacity(n),
            ids: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
            colors: Vec::with_capacity(n),
        };
        for r in records {
            columns.parents.push(r.parent_id.clone());
            columns.ids.push(r.split_id.clone());
            columns.labels.push(r.label.clone());
            columns.values.push(r.value);
            columns.colors.push(r.category.clone());
        }
        columns
    }
}

impl From<Vec<SplitRecord>> for SplitColumns {
    fn from(records: Vec<SplitRecord>) -> Self {
        SplitColumns::from(records.as_slice())
    }
}
