//! Chart options
//!
//! Styling configuration handed through to the renderer. The engine never
//! reads any of it; the only checks made here are the ones a renderer would
//! otherwise reject late.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Smallest width or height, in pixels, a figure accepts.
pub const MIN_FIGURE_SIZE: u32 = 10;

/// Hierarchical chart flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Sunburst,
    Treemap,
}

impl ChartKind {
    /// Trace type name
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Sunburst => "sunburst",
            ChartKind::Treemap => "treemap",
        }
    }
}

/// How `values` are summed up the hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchValues {
    /// A sector's value is the total of everything below it
    #[default]
    Total,
    /// A sector's value is what remains after its children
    Remainder,
}

impl BranchValues {
    pub fn as_str(self) -> &'static str {
        match self {
            BranchValues::Total => "total",
            BranchValues::Remainder => "remainder",
        }
    }
}

/// A split-record column that hover and custom data can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ParentId,
    SplitId,
    Label,
    Value,
    Category,
}

impl Field {
    /// Column name as it appears on the record
    pub fn name(self) -> &'static str {
        match self {
            Field::ParentId => "parent_id",
            Field::SplitId => "split_id",
            Field::Label => "label",
            Field::Value => "value",
            Field::Category => "category",
        }
    }
}

/// Keyword form of `color_discrete_map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKeyword {
    /// Category values are themselves colours
    Identity,
}

/// Fixed colours per category, or the `"identity"` keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDiscreteMap {
    Keyword(MapKeyword),
    Explicit(BTreeMap<String, String>),
}

impl Default for ColorDiscreteMap {
    fn default() -> Self {
        ColorDiscreteMap::Explicit(BTreeMap::new())
    }
}

impl ColorDiscreteMap {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        ColorDiscreteMap::Explicit(pairs.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect())
    }

    /// Colour for `category`. Under `"identity"` that is the category itself.
    pub fn get<'a>(&'a self, category: &'a str) -> Option<&'a str> {
        match self {
            ColorDiscreteMap::Keyword(MapKeyword::Identity) => Some(category),
            ColorDiscreteMap::Explicit(map) => map.get(category).map(String::as_str),
        }
    }
}

/// Figure configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub color_continuous_scale: Option<Vec<String>>,
    pub range_color: Option<[f64; 2]>,
    pub color_continuous_midpoint: Option<f64>,
    /// Colours cycled through per category, in order of first appearance
    pub color_discrete_sequence: Option<Vec<String>>,
    /// Fixed colours for specific categories. Mapped categories still use
    /// up a sequence slot
    pub color_discrete_map: ColorDiscreteMap,
    pub hover_name: Option<Field>,
    pub hover_data: Vec<Field>,
    pub custom_data: Vec<Field>,
    /// Display names for columns, keyed by column name
    pub labels: BTreeMap<String, String>,
    pub title: Option<String>,
    pub template: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub branchvalues: BranchValues,
    /// Levels rendered from any given level; -1 renders all of them
    pub maxdepth: Option<i32>,
}

impl ChartOptions {
    /// Reject values no renderer would accept.
    pub fn validate(&self) -> Result<(), ChartError> {
        if let Some(depth) = self.maxdepth {
            if depth != -1 && depth < 1 {
                return Err(ChartError::InvalidMaxDepth(depth));
            }
        }
        if let Some([low, high]) = self.range_color {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(ChartError::InvalidRangeColor(low, high));
            }
        }
        for (dimension, size) in [("width", self.width), ("height", self.height)] {
            match size {
                Some(value) if value < MIN_FIGURE_SIZE => {
                    return Err(ChartError::InvalidSize { dimension, value });
                }
                _ => {}
            }
        }
        if matches!(&self.color_discrete_sequence, Some(seq) if seq.is_empty()) {
            return Err(ChartError::EmptyColorSequence);
        }
        Ok(())
    }

    /// Display name for a column, honouring `labels`.
    pub fn display_name(&self, field: Field) -> &str {
        self.labels
            .get(field.name())
            .map(String::as_str)
            .unwrap_or(field.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ChartOptions::default();
        assert_eq!(options.kind, ChartKind::Sunburst);
        assert_eq!(options.branchvalues, BranchValues::Total);
        assert!(options.maxdepth.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{
            "kind": "treemap",
            "title": "Decision path",
            "branchvalues": "remainder",
            "maxdepth": 3,
            "hover_data": ["value", "category"],
            "color_discrete_map": {"petal width (cm)": "red"}
        }"#;
        let options: ChartOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.kind, ChartKind::Treemap);
        assert_eq!(options.branchvalues, BranchValues::Remainder);
        assert_eq!(options.maxdepth, Some(3));
        assert_eq!(options.hover_data, [Field::Value, Field::Category]);
        assert_eq!(options.color_discrete_map.get("petal width (cm)"), Some("red"));
        assert_eq!(options.color_discrete_map.get("petal length (cm)"), None);
        assert!(options.width.is_none());
    }

    #[test]
    fn test_deserialize_identity_map() {
        let options: ChartOptions = serde_json::from_str(r#"{"color_discrete_map": "identity"}"#).unwrap();
        assert_eq!(options.color_discrete_map, ColorDiscreteMap::Keyword(MapKeyword::Identity));
        assert_eq!(options.color_discrete_map.get("#ff0000"), Some("#ff0000"));

        let result: Result<ChartOptions, _> = serde_json::from_str(r#"{"color_discrete_map": "rainbow"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_field() {
        let result: Result<ChartOptions, _> = serde_json::from_str(r#"{"colour": "red"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_maxdepth_validation() {
        for (depth, ok) in [(-1, true), (1, true), (5, true), (0, false), (-2, false)] {
            let options = ChartOptions {
                maxdepth: Some(depth),
                ..ChartOptions::default()
            };
            assert_eq!(options.validate().is_ok(), ok, "maxdepth {}", depth);
        }
    }

    #[test]
    fn test_range_color_validation() {
        let options = ChartOptions {
            range_color: Some([1.0, 0.0]),
            ..ChartOptions::default()
        };
        assert!(matches!(options.validate(), Err(ChartError::InvalidRangeColor(..))));
    }

    #[test]
    fn test_size_validation() {
        let options = ChartOptions {
            width: Some(800),
            height: Some(5),
            ..ChartOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ChartError::InvalidSize { dimension: "height", value: 5 })
        ));
    }

    #[test]
    fn test_empty_color_sequence_rejected() {
        let options = ChartOptions {
            color_discrete_sequence: Some(vec![]),
            ..ChartOptions::default()
        };
        assert!(matches!(options.validate(), Err(ChartError::EmptyColorSequence)));
    }

    #[test]
    fn test_display_name() {
        let mut options = ChartOptions::default();
        options.labels.insert("value".into(), "samples".into());
        assert_eq!(options.display_name(Field::Value), "samples");
        assert_eq!(options.display_name(Field::Label), "label");
    }
}
