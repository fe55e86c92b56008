// Series and chart domain models
use super::axis::tick_interval;
use serde::{Deserialize, Serialize};

/// One metric's samples over a period, as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesResult {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub unit: String,
    pub title: String,
}

impl SeriesResult {
    pub fn new(labels: Vec<String>, values: Vec<f64>, unit: String, title: String) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self {
            labels,
            values,
            unit,
            title,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// No samples in range. Not an error; the chart is simply not drawn.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub color: String,
    pub values: Vec<f64>,
    pub title: String,
}

/// Everything the drawing surface needs for one chart.
///
/// Every dataset is plotted against the single `labels` axis. For composite
/// charts `datasets` has one slot per group member; a member without data
/// leaves its slot `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Option<Dataset>>,
    pub axis_unit: String,
    pub axis_tick_interval: Option<f64>,
}

impl ChartSpec {
    /// Build a one-dataset chart. Labels and values are carried over as-is.
    pub fn single(series: SeriesResult, color: &str) -> Self {
        let axis_tick_interval = tick_interval(&series.values);
        let dataset = Dataset {
            color: color.to_string(),
            values: series.values,
            title: series.title.clone(),
        };

        Self {
            title: series.title,
            labels: series.labels,
            datasets: vec![Some(dataset)],
            axis_unit: series.unit,
            axis_tick_interval,
        }
    }

    pub fn has_data(&self) -> bool {
        self.datasets
            .iter()
            .flatten()
            .any(|dataset| !dataset.values.is_empty())
    }
}

/// Accumulates group members' results into per-position slots.
///
/// The label axis and unit are taken from the first member that has data;
/// later members are plotted against those labels.
#[derive(Debug)]
pub struct CompositeChart {
    title: String,
    labels: Option<Vec<String>>,
    unit: Option<String>,
    slots: Vec<Option<Dataset>>,
}

impl CompositeChart {
    pub fn new(title: impl Into<String>, size: usize) -> Self {
        Self {
            title: title.into(),
            labels: None,
            unit: None,
            slots: vec![None; size],
        }
    }

    /// Record the result for the member at `position`. Empty results leave the slot unset.
    pub fn fill(&mut self, position: usize, color: &str, series: SeriesResult) {
        if series.is_empty() || position >= self.slots.len() {
            return;
        }

        if self.labels.is_none() {
            self.labels = Some(series.labels);
            self.unit = Some(series.unit);
        }

        self.slots[position] = Some(Dataset {
            color: color.to_string(),
            values: series.values,
            title: series.title,
        });
    }

    pub fn finish(self) -> ChartSpec {
        let all_values: Vec<f64> = self
            .slots
            .iter()
            .flatten()
            .flat_map(|dataset| dataset.values.iter().copied())
            .collect();

        ChartSpec {
            title: self.title,
            labels: self.labels.unwrap_or_default(),
            axis_tick_interval: tick_interval(&all_values),
            datasets: self.slots,
            axis_unit: self.unit.unwrap_or_default(),
        }
    }
}
