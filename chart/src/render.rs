//! Rendering adapter
//!
//! A [`HierarchyRenderer`] binds the columns of a flattened tree to the
//! channels of a hierarchical chart:
//!
//!   - parent_id -> parents
//!   - split_id  -> ids
//!   - label     -> labels
//!   - value     -> values
//!   - category  -> marker colours
//!
//! [`PlotlyFigure`] emits a Plotly figure description (`data` + `layout`) as
//! JSON. Drawing it is left to whatever consumes the JSON.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use tracing::debug;
use treeburst_engine::{DecisionTree, FeatureNames, SplitColumns};

use crate::error::ChartError;
use crate::options::{ChartOptions, ColorDiscreteMap, Field, MapKeyword};

/// Plotly's default qualitative palette.
pub const DEFAULT_COLOR_SEQUENCE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880", "#FF97FF", "#FECB52",
];

/// Anything that can turn split columns into a chart.
pub trait HierarchyRenderer {
    type Output;

    fn render(&self, columns: &SplitColumns) -> Result<Self::Output, ChartError>;
}

/// Builds Plotly sunburst/treemap figures.
#[derive(Debug, Clone, Default)]
pub struct PlotlyFigure {
    options: ChartOptions,
}

impl PlotlyFigure {
    /// Create a figure builder. Options are validated up front.
    pub fn new(options: ChartOptions) -> Result<Self, ChartError> {
        options.validate()?;
        Ok(PlotlyFigure { options })
    }

    fn trace(&self, columns: &SplitColumns) -> Value {
        let options = &self.options;
        let mut trace = Map::new();
        trace.insert("type".into(), json!(options.kind.as_str()));
        trace.insert("ids".into(), json!(columns.ids));
        trace.insert("parents".into(), json!(columns.parents));
        trace.insert("labels".into(), json!(columns.labels));
        trace.insert("values".into(), json!(columns.values));
        trace.insert("branchvalues".into(), json!(options.branchvalues.as_str()));
        trace.insert(
            "marker".into(),
            json!({ "colors": discrete_colors(&columns.colors, options) }),
        );
        if let Some(depth) = options.maxdepth {
            trace.insert("maxdepth".into(), json!(depth));
        }
        if let Some(field) = options.hover_name {
            let text: Vec<Value> = (0..columns.len()).map(|i| cell(columns, field, i)).collect();
            trace.insert("hovertext".into(), Value::Array(text));
        }

        let custom = custom_fields(options);
        if !custom.is_empty() {
            let rows: Vec<Value> = (0..columns.len())
                .map(|i| Value::Array(custom.iter().map(|&f| cell(columns, f, i)).collect()))
                .collect();
            trace.insert("customdata".into(), Value::Array(rows));
        }
        trace.insert("hovertemplate".into(), json!(hover_template(options, &custom)));
        Value::Object(trace)
    }

    fn layout(&self) -> Value {
        let options = &self.options;
        let mut layout = Map::new();
        if let Some(title) = &options.title {
            layout.insert("title".into(), json!({ "text": title }));
        }
        if let Some(template) = &options.template {
            layout.insert("template".into(), json!(template));
        }
        if let Some(width) = options.width {
            layout.insert("width".into(), json!(width));
        }
        if let Some(height) = options.height {
            layout.insert("height".into(), json!(height));
        }

        let mut coloraxis = Map::new();
        if let Some(scale) = &options.color_continuous_scale {
            coloraxis.insert("colorscale".into(), json!(scale));
        }
        if let Some([low, high]) = options.range_color {
            coloraxis.insert("cmin".into(), json!(low));
            coloraxis.insert("cmax".into(), json!(high));
        }
        if let Some(mid) = options.color_continuous_midpoint {
            coloraxis.insert("cmid".into(), json!(mid));
        }
        if !coloraxis.is_empty() {
            layout.insert("coloraxis".into(), Value::Object(coloraxis));
        }
        Value::Object(layout)
    }
}

impl HierarchyRenderer for PlotlyFigure {
    type Output = Value;

    fn render(&self, columns: &SplitColumns) -> Result<Value, ChartError> {
        check_aligned(columns)?;
        let figure = json!({
            "data": [self.trace(columns)],
            "layout": self.layout(),
        });
        debug!(kind = self.options.kind.as_str(), records = columns.len(), "rendered figure");
        Ok(figure)
    }
}

/// Flatten a tree and render it in one go.
pub fn render_tree(tree: &DecisionTree, names: &FeatureNames, options: ChartOptions) -> Result<Value, ChartError> {
    let renderer = PlotlyFigure::new(options)?;
    let records = tree.flatten(names)?;
    renderer.render(&SplitColumns::from(records))
}

fn check_aligned(columns: &SplitColumns) -> Result<(), ChartError> {
    match columns.misaligned() {
        Some((field, actual)) => Err(ChartError::ColumnLengthMismatch {
            field,
            expected: columns.ids.len(),
            actual,
        }),
        None => Ok(()),
    }
}

/// Colour per record.
///
/// The mapping starts as a copy of `color_discrete_map`; each category not
/// yet mapped, in order of first appearance, takes
/// `sequence[mapping.len() % sequence.len()]`. Map entries therefore use up
/// sequence slots. With the `"identity"` map the categories are the colours.
/// An empty or missing sequence falls back to [`DEFAULT_COLOR_SEQUENCE`].
pub fn discrete_colors(categories: &[String], options: &ChartOptions) -> Vec<String> {
    let fixed = match &options.color_discrete_map {
        ColorDiscreteMap::Keyword(MapKeyword::Identity) => return categories.to_vec(),
        ColorDiscreteMap::Explicit(fixed) => fixed,
    };
    let sequence: Vec<&str> = match &options.color_discrete_sequence {
        Some(seq) if !seq.is_empty() => seq.iter().map(String::as_str).collect(),
        _ => DEFAULT_COLOR_SEQUENCE.to_vec(),
    };

    let mut mapping: HashMap<&str, &str> = fixed.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    categories
        .iter()
        .map(|category| {
            let next = sequence[mapping.len() % sequence.len()];
            (*mapping.entry(category.as_str()).or_insert(next)).to_owned()
        })
        .collect()
}

/// Hover and custom data columns, deduplicated, hover columns first.
fn custom_fields(options: &ChartOptions) -> Vec<Field> {
    let mut fields: Vec<Field> = Vec::new();
    for &field in options.hover_data.iter().chain(&options.custom_data) {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    fields
}

fn hover_template(options: &ChartOptions, custom: &[Field]) -> String {
    let mut lines = vec![
        format!("{}=%{{label}}", options.display_name(Field::Label)),
        format!("{}=%{{value}}", options.display_name(Field::Value)),
        format!("{}=%{{parent}}", options.display_name(Field::ParentId)),
        format!("{}=%{{id}}", options.display_name(Field::SplitId)),
    ];
    for (i, field) in custom.iter().enumerate() {
        if options.hover_data.contains(field) {
            lines.push(format!("{}=%{{customdata[{i}]}}", options.display_name(*field)));
        }
    }

    let mut template = String::new();
    if options.hover_name.is_some() {
        template.push_str("<b>%{hovertext}</b><br><br>");
    }
    template.push_str(&lines.join("<br>"));
    template.push_str("<extra></extra>");
    template
}

fn cell(columns: &SplitColumns, field: Field, i: usize) -> Value {
    match field {
        Field::ParentId => json!(columns.parents[i]),
        Field::SplitId => json!(columns.ids[i]),
        Field::Label => json!(columns.labels[i]),
        Field::Value => json!(columns.values[i]),
        Field::Category => json!(columns.colors[i]),
    }
}
