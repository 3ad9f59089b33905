// src/charts/build.rs
use super::{
    options::{FundingSource, HousingCategory, MapSize, MapStyle, Measure, ProjectMetric},
    stats, BarSeries, CategoryBox, ChartSpec, LatLon, MapPoint, ScatterPoint, ScatterSeries,
    YearBar, YearTotal,
};
use crate::error::Result;
use crate::process::utils::{f64_values, i64_values, string_values};
use crate::schema::columns::*;
use arrow::record_batch::RecordBatch;
use std::collections::BTreeMap;
use tracing::debug;

/// Bins per axis of the funding/metric heatmap.
pub const HEATMAP_BINS: usize = 10;

/// Where the site map opens: central Los Angeles.
pub const MAP_CENTER: LatLon = LatLon {
    lat: 34.088,
    lon: -118.353,
};

fn labels(batch: &RecordBatch, column: &str) -> Result<Vec<Option<String>>> {
    let values = string_values(batch, column)?;
    Ok(values.iter().map(|v| v.map(str::to_string)).collect())
}

fn years(batch: &RecordBatch) -> Result<Vec<Option<i32>>> {
    Ok(i64_values(batch, YEAR_FUNDED)?
        .into_iter()
        .map(|y| y.and_then(|y| i32::try_from(y).ok()))
        .collect())
}

/// Total development cost per funding year, stacked by `category`.
///
/// The binary feeds this `projects_without_jobs` (see
/// [`PreparedDataset::project_table`](crate::PreparedDataset::project_table)),
/// so projects that lack only a JOBS figure still add to the totals.
pub fn cost_by_year(projects: &RecordBatch, category: HousingCategory) -> Result<ChartSpec> {
    let years = years(projects)?;
    let cost = f64_values(projects, TOTAL_DEVELOPMENT_COST)?;
    let groups = labels(projects, category.column())?;

    let mut totals: BTreeMap<String, BTreeMap<i32, f64>> = BTreeMap::new();
    for ((year, cost), group) in years.iter().zip(&cost).zip(&groups) {
        if let (Some(year), Some(cost), Some(group)) = (year, cost, group) {
            *totals
                .entry(group.clone())
                .or_default()
                .entry(*year)
                .or_default() += cost;
        }
    }

    let series = totals
        .into_iter()
        .map(|(name, by_year)| BarSeries {
            name,
            bars: by_year
                .into_iter()
                .map(|(year, total)| YearTotal { year, total })
                .collect(),
        })
        .collect::<Vec<_>>();
    debug!(series = series.len(), "cost_by_year");

    Ok(ChartSpec::StackedBar {
        title: format!("TOTAL COST and {category} by YEAR FUNDED"),
        x_label: YEAR_FUNDED.to_string(),
        y_label: TOTAL_DEVELOPMENT_COST.to_string(),
        color_label: category.to_string(),
        series,
    })
}

/// One point per project: metric on x, funding on y, sized by units.
pub fn funding_scatter(
    projects: &RecordBatch,
    funding: FundingSource,
    metric: ProjectMetric,
    category: HousingCategory,
) -> Result<ChartSpec> {
    let xs = f64_values(projects, metric.column())?;
    let ys = f64_values(projects, funding.column())?;
    let sizes = f64_values(projects, PROJECT_TOTAL_UNITS)?;
    let groups = labels(projects, category.column())?;
    let names = labels(projects, PROJECT_NUMBER)?;

    let mut by_group: BTreeMap<String, Vec<ScatterPoint>> = BTreeMap::new();
    for row in 0..projects.num_rows() {
        if let (Some(x), Some(y), Some(size), Some(group), Some(label)) =
            (xs[row], ys[row], sizes[row], &groups[row], &names[row])
        {
            by_group.entry(group.clone()).or_default().push(ScatterPoint {
                x,
                y,
                size,
                label: label.clone(),
            });
        }
    }

    Ok(ChartSpec::Scatter {
        title: format!("{funding} versus {metric} by {category}"),
        x_label: metric.to_string(),
        y_label: funding.to_string(),
        size_label: PROJECT_TOTAL_UNITS.to_string(),
        color_label: category.to_string(),
        series: by_group
            .into_iter()
            .map(|(name, points)| ScatterSeries { name, points })
            .collect(),
    })
}

/// Project density over (metric, funding).
pub fn funding_heatmap(
    projects: &RecordBatch,
    funding: FundingSource,
    metric: ProjectMetric,
) -> Result<ChartSpec> {
    let xs = f64_values(projects, metric.column())?;
    let ys = f64_values(projects, funding.column())?;
    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(&ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    Ok(ChartSpec::Heatmap {
        title: format!("{funding} versus {metric}"),
        x_label: metric.to_string(),
        y_label: funding.to_string(),
        histogram: stats::histogram2d(&points, HEATMAP_BINS),
    })
}

/// Funding per project by year, each bar coloured by the metric.
pub fn funding_by_year(
    projects: &RecordBatch,
    funding: FundingSource,
    metric: ProjectMetric,
) -> Result<ChartSpec> {
    let years = years(projects)?;
    let values = f64_values(projects, funding.column())?;
    let colors = f64_values(projects, metric.column())?;
    let names = labels(projects, PROJECT_NUMBER)?;
    let dates = labels(projects, DATE_FUNDED)?;

    let mut bars = Vec::with_capacity(projects.num_rows());
    for row in 0..projects.num_rows() {
        if let (Some(year), Some(value), Some(color), Some(label), Some(date)) =
            (years[row], values[row], colors[row], &names[row], &dates[row])
        {
            bars.push(YearBar {
                year,
                value,
                color,
                label: label.clone(),
                date_funded: date.clone(),
            });
        }
    }
    bars.sort_by_key(|b| b.year);

    Ok(ChartSpec::Bar {
        title: format!("{funding} and {metric} by YEAR FUNDED"),
        x_label: YEAR_FUNDED.to_string(),
        y_label: funding.to_string(),
        color_label: metric.to_string(),
        bars,
    })
}

/// Horizontal box plots of `measure` per `category`, optionally split again
/// by a second category (`None` is the dashboard's "ALL").
///
/// Unless `measure` is JOBS, the binary feeds this `projects_without_jobs`,
/// so the boxes include projects that lack only a JOBS figure.
pub fn measure_box(
    projects: &RecordBatch,
    measure: Measure,
    category: HousingCategory,
    split: Option<HousingCategory>,
) -> Result<ChartSpec> {
    let values = f64_values(projects, measure.column())?;
    let groups = labels(projects, category.column())?;
    let splits = match split {
        Some(s) => Some(labels(projects, s.column())?),
        None => None,
    };

    let mut samples: BTreeMap<(String, Option<String>), Vec<f64>> = BTreeMap::new();
    for row in 0..projects.num_rows() {
        let (Some(value), Some(group)) = (values[row], &groups[row]) else {
            continue;
        };
        let split_value = match &splits {
            Some(s) => match &s[row] {
                Some(v) => Some(v.clone()),
                None => continue,
            },
            None => None,
        };
        samples
            .entry((group.clone(), split_value))
            .or_default()
            .push(value);
    }

    let boxes = samples
        .into_iter()
        .filter_map(|((category, split), values)| {
            stats::box_stats(&values).map(|stats| CategoryBox {
                category,
                split,
                stats,
            })
        })
        .collect();

    let title = match split {
        Some(s) => format!("{measure} by {category} and {s}"),
        None => format!("{measure} by {category}"),
    };
    Ok(ChartSpec::BoxPlot {
        title,
        value_label: measure.to_string(),
        category_label: category.to_string(),
        split_label: split.map(|s| s.to_string()),
        boxes,
    })
}

/// Every site on a map, coloured by `category` and optionally sized.
/// Takes the site-level table, not a project table.
pub fn site_map(
    sites: &RecordBatch,
    category: HousingCategory,
    size: MapSize,
    style: MapStyle,
) -> Result<ChartSpec> {
    let lats = f64_values(sites, SITE_LATITUDE)?;
    let lons = f64_values(sites, SITE_LONGITUDE)?;
    let groups = labels(sites, category.column())?;
    let names = labels(sites, PROJECT_NUMBER)?;
    let units = i64_values(sites, SITE_UNITS)?;
    let sizes = match size.column() {
        Some(col) => Some(f64_values(sites, col)?),
        None => None,
    };

    let mut points = Vec::with_capacity(sites.num_rows());
    for row in 0..sites.num_rows() {
        let (Some(lat), Some(lon), Some(group), Some(name)) =
            (lats[row], lons[row], &groups[row], &names[row])
        else {
            continue;
        };
        let size = match &sizes {
            Some(s) => match s[row] {
                Some(v) => Some(v),
                None => continue,
            },
            None => None,
        };
        points.push(MapPoint {
            lat,
            lon,
            category: group.clone(),
            size,
            project_number: name.clone(),
            site_units: units[row],
        });
    }
    debug!(sites = sites.num_rows(), plotted = points.len(), "site_map");

    let title = match size {
        MapSize::None => format!("Affordable Housing by {category}"),
        _ => format!("Affordable Housing by {category} and {size}"),
    };
    Ok(ChartSpec::Map {
        title,
        center: MAP_CENTER,
        style,
        color_label: category.to_string(),
        size_label: size.column().map(str::to_string),
        points,
    })
}
