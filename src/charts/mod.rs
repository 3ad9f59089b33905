//! Chart specifications for the dashboard.
//!
//! Every builder is a pure function of a prepared table and the user's
//! current choices. The presentation layer renders the returned
//! [`ChartSpec`]; nothing here keeps state between calls.

pub mod build;
pub mod options;
pub mod stats;

pub use build::{
    cost_by_year, funding_by_year, funding_heatmap, funding_scatter, measure_box, site_map,
    HEATMAP_BINS, MAP_CENTER,
};
pub use options::{
    FundingSource, HousingCategory, MapSize, MapStyle, Measure, ProjectMetric, UnknownOption,
};
pub use stats::{BoxStats, Histogram2d};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub total: f64,
}

/// One colour group of a stacked bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub name: String,
    pub bars: Vec<YearTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

/// One project's bar segment, coloured on a continuous scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBar {
    pub year: i32,
    pub value: f64,
    pub color: f64,
    pub label: String,
    pub date_funded: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBox {
    pub category: String,
    /// Second grouping level; `None` when the plot is not split.
    pub split: Option<String>,
    pub stats: BoxStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    pub size: Option<f64>,
    pub project_number: String,
    pub site_units: Option<i64>,
}

/// A chart, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    StackedBar {
        title: String,
        x_label: String,
        y_label: String,
        color_label: String,
        series: Vec<BarSeries>,
    },
    Scatter {
        title: String,
        x_label: String,
        y_label: String,
        size_label: String,
        color_label: String,
        series: Vec<ScatterSeries>,
    },
    Heatmap {
        title: String,
        x_label: String,
        y_label: String,
        histogram: Histogram2d,
    },
    Bar {
        title: String,
        x_label: String,
        y_label: String,
        color_label: String,
        bars: Vec<YearBar>,
    },
    BoxPlot {
        title: String,
        value_label: String,
        category_label: String,
        split_label: Option<String>,
        boxes: Vec<CategoryBox>,
    },
    Map {
        title: String,
        center: LatLon,
        style: MapStyle,
        color_label: String,
        size_label: Option<String>,
        points: Vec<MapPoint>,
    },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::StackedBar { title, .. }
            | ChartSpec::Scatter { title, .. }
            | ChartSpec::Heatmap { title, .. }
            | ChartSpec::Bar { title, .. }
            | ChartSpec::BoxPlot { title, .. }
            | ChartSpec::Map { title, .. } => title,
        }
    }
}
