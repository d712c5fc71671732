//! treeburst Chart - Hierarchical chart adapter
//!
//! This crate binds the split records produced by `treeburst_engine` to a
//! hierarchical chart description (Plotly sunburst or treemap), carrying the
//! styling options through untouched.
//!
//! The engine does not depend on this crate; any renderer honouring the same
//! column contract can replace it.

pub mod error;
pub mod options;
pub mod render;

pub use error::ChartError;
pub use options::{BranchValues, ChartKind, ChartOptions, ColorDiscreteMap, Field, MapKeyword};
pub use render::{discrete_colors, render_tree, HierarchyRenderer, PlotlyFigure};
