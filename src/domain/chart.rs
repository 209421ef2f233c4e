// Chart domain model and the deterministic renderer

use super::table::Table;
use serde::Serialize;
use thiserror::Error;

// Discrete palettes matching the original dashboard's color sequences.
pub const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];
pub const PASTEL: &[&str] = &[
    "#66c5cc", "#f6cf71", "#f89c74", "#dcb0f2", "#87c55f", "#9eb9f3", "#fe88b1", "#c9db74",
    "#8be0a4", "#b3b3b3",
];
pub const BLUES: &[&str] = &[
    "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c", "#08306b",
];
pub const PRISM: &[&str] = &[
    "#5f4690", "#1d6996", "#38a6a5", "#0f8554", "#73af48", "#edad08", "#e17c05", "#cc503e",
    "#94346e", "#666666",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Line,
    Scatter,
}

/// Binds a visual axis to a result column, with an optional display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBinding {
    pub column: &'static str,
    pub label: Option<&'static str>,
}

impl AxisBinding {
    pub const fn column(column: &'static str) -> Self {
        Self {
            column,
            label: None,
        }
    }

    pub const fn labeled(column: &'static str, label: &'static str) -> Self {
        Self {
            column,
            label: Some(label),
        }
    }

    pub fn display_label(&self) -> &'static str {
        self.label.unwrap_or(self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBinding {
    /// One trace per distinct value of this column, palette colors assigned
    /// in first-seen row order.
    Column(&'static str),
    /// Single trace with a fixed color.
    Fixed(&'static str),
}

/// Static visual mapping for one visualization: chart kind, axis bindings,
/// color grouping, optional marker size column, title, and palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub x: AxisBinding,
    pub y: AxisBinding,
    pub color: ColorBinding,
    pub size: Option<&'static str>,
    pub markers: bool,
    pub palette: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub color: String,
    pub x: Vec<serde_json::Value>,
    pub y: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<serde_json::Value>>,
}

/// Renderable chart object. Derived deterministically from a table and a
/// spec; successive refreshes replace the previous chart via a fresh key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub key: String,
    pub title: String,
    pub kind: ChartKind,
    pub markers: bool,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("result is missing column '{0}' required by the chart spec")]
    MissingColumn(String),
    #[error("row {0} has fewer cells than the bound columns")]
    ShortRow(usize),
}

/// Render a table into a chart. Pure and deterministic: the same table and
/// spec always produce the same chart, differing only in `display_key`.
/// Zero rows yield a chart with no traces but intact title and axis labels.
pub fn render(table: &Table, spec: &ChartSpec, display_key: &str) -> Result<Chart, RenderError> {
    let require = |column: &str| {
        table
            .column_index(column)
            .ok_or_else(|| RenderError::MissingColumn(column.to_string()))
    };

    // An empty schema with zero rows still renders (axes and title intact);
    // a populated result missing a bound column is a schema mismatch.
    let (x_idx, y_idx, color_idx, size_idx) = if table.columns.is_empty() && table.rows.is_empty() {
        (0, 0, None, None)
    } else {
        let x_idx = require(spec.x.column)?;
        let y_idx = require(spec.y.column)?;
        let color_idx = match spec.color {
            ColorBinding::Column(column) => Some(require(column)?),
            ColorBinding::Fixed(_) => None,
        };
        let size_idx = spec.size.map(require).transpose()?;
        (x_idx, y_idx, color_idx, size_idx)
    };

    let mut traces: Vec<Trace> = Vec::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        // Broker rows can arrive shorter than the declared schema; that is
        // malformed wire data, not a crash.
        let cell = |idx: usize| row.get(idx).ok_or(RenderError::ShortRow(row_idx));

        let group = match color_idx {
            Some(idx) => scalar_label(cell(idx)?),
            None => spec.title.to_string(),
        };

        let x_value = cell(x_idx)?.clone();
        let y_value = cell(y_idx)?.clone();
        let size_value = match size_idx {
            Some(idx) => Some(cell(idx)?.clone()),
            None => None,
        };

        let slot = match traces.iter().position(|t| t.name == group) {
            Some(pos) => pos,
            None => {
                let color = match spec.color {
                    ColorBinding::Fixed(color) => color.to_string(),
                    ColorBinding::Column(_) => {
                        spec.palette[traces.len() % spec.palette.len()].to_string()
                    }
                };
                traces.push(Trace {
                    name: group,
                    color,
                    x: Vec::new(),
                    y: Vec::new(),
                    sizes: size_idx.map(|_| Vec::new()),
                });
                traces.len() - 1
            }
        };

        let trace = &mut traces[slot];
        trace.x.push(x_value);
        trace.y.push(y_value);
        if let (Some(value), Some(sizes)) = (size_value, trace.sizes.as_mut()) {
            sizes.push(value);
        }
    }

    Ok(Chart {
        key: display_key.to_string(),
        title: spec.title.to_string(),
        kind: spec.kind,
        markers: spec.markers,
        x_label: spec.x.display_label().to_string(),
        y_label: spec.y.display_label().to_string(),
        traces,
    })
}

/// Human-readable label for a scalar cell (trace names, legend entries).
fn scalar_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
