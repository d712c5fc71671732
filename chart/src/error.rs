//! Error types for figure construction

use treeburst_engine::FlattenError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("maxdepth must be -1 or a positive integer, got {0}")]
    InvalidMaxDepth(i32),

    #[error("range_color must be finite and ascending, got [{0}, {1}]")]
    InvalidRangeColor(f64, f64),

    #[error("{dimension} must be at least 10 pixels, got {value}")]
    InvalidSize { dimension: &'static str, value: u32 },

    #[error("color_discrete_sequence must not be empty")]
    EmptyColorSequence,

    #[error("column {field} has {actual} entries, expected {expected}")]
    ColumnLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Flatten(#[from] FlattenError),
}
