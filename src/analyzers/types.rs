//! Data types produced by the aggregation pipeline.

use serde::{Deserialize, Serialize};

/// One `(label, value)` entry of a [`SummarySeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Ordered `(label, value)` pairs handed to a chart surface.
///
/// Scatter charts carry `(x, y)` pairs in `scatter` instead of labelled
/// points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarySeries {
    pub title: String,
    pub points: Vec<SeriesPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scatter: Vec<ScatterPoint>,
}

impl SummarySeries {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            points: Vec::new(),
            scatter: Vec::new(),
        }
    }

    pub fn from_scatter(title: impl Into<String>, scatter: Vec<ScatterPoint>) -> Self {
        Self {
            title: title.into(),
            points: Vec::new(),
            scatter,
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push(SeriesPoint {
            label: label.into(),
            value,
        });
    }

    /// Number of plotted entries, labelled or scatter.
    pub fn len(&self) -> usize {
        self.points.len() + self.scatter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Renames every label in place, keeping order and values.
    pub fn map_labels(mut self, f: impl Fn(&str) -> String) -> Self {
        for point in &mut self.points {
            point.label = f(&point.label);
        }
        self
    }
}

/// A `{ feature, importance }` pair from the feature-importance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Running sum and count for one group or bin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub sum: f64,
    pub count: usize,
}

impl Accumulator {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Arithmetic mean; 0.0 for an empty group.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// A single point of a scatter chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Descriptive statistics for the outcome field of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostSummary {
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

/// Chart-type tag passed to the chart surface alongside a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Pie,
    Line,
    Scatter,
}
