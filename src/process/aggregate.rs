use crate::error::Result;
use crate::process::{
    date_parser,
    utils::{self, append_column, f64_values, i64_values, replace_column, string_values},
};
use crate::schema::columns::*;
use arrow::{
    array::{
        Array, ArrayRef, Date32Array, Float64Array, Int32Array, Int64Array, StringArray,
        UInt32Array,
    },
    compute::take,
    record_batch::RecordBatch,
};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tracing::debug;

/// Number of site rows per project number. Rows without a project number
/// belong to no project and are not counted.
pub fn site_counts(batch: &RecordBatch) -> Result<HashMap<String, i64>> {
    let projects = string_values(batch, PROJECT_NUMBER)?;
    let mut counts: HashMap<String, i64> = HashMap::new();
    for project in projects.iter().flatten() {
        *counts.entry(project.to_string()).or_default() += 1;
    }
    Ok(counts)
}

/// Keep the first row (in input order) of every project, sorted ascending by
/// project number.
pub fn first_per_project(batch: &RecordBatch) -> Result<RecordBatch> {
    let projects = string_values(batch, PROJECT_NUMBER)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let mut firsts: Vec<(&str, u32)> = Vec::new();
    for (row, project) in projects.iter().enumerate() {
        if let Some(p) = project {
            if seen.insert(p) {
                firsts.push((p, row as u32));
            }
        }
    }
    firsts.sort_by(|a, b| a.0.cmp(b.0));

    let indices = UInt32Array::from(firsts.iter().map(|(_, row)| *row).collect::<Vec<_>>());
    let columns = batch
        .columns()
        .iter()
        .map(|col| take(col.as_ref(), &indices, None))
        .collect::<std::result::Result<Vec<ArrayRef>, _>>()?;

    debug!(
        sites = batch.num_rows(),
        projects = indices.len(),
        "deduplicated to project granularity"
    );
    RecordBatch::try_new(batch.schema(), columns).map_err(Into::into)
}

/// Attach `NUMBER OF SITES` by looking each row's project number up in
/// `counts`.
pub fn attach_site_counts(
    batch: &RecordBatch,
    counts: &HashMap<String, i64>,
) -> Result<RecordBatch> {
    let projects = string_values(batch, PROJECT_NUMBER)?;
    let sites: Int64Array = projects
        .iter()
        .map(|p| p.and_then(|p| counts.get(p).copied()))
        .collect();
    append_column(batch, NUMBER_OF_SITES, Arc::new(sites))
}

/// Turn the `Date32` funding date into `YYYY-MM-DD` text and add
/// `YEAR FUNDED`, taken from the first four characters of that text.
pub fn attach_year_funded(batch: &RecordBatch) -> Result<RecordBatch> {
    let col = utils::column(batch, DATE_FUNDED)?;
    let dates = col
        .as_any()
        .downcast_ref::<Date32Array>()
        .ok_or_else(|| crate::error::PipelineError::UnexpectedType {
            column: DATE_FUNDED.to_string(),
            found: col.data_type().to_string(),
        })?;

    let text: StringArray = dates
        .iter()
        .map(|d| {
            d.and_then(date_parser::from_date32)
                .map(|d| d.format("%Y-%m-%d").to_string())
        })
        .collect();
    let years: Int32Array = text
        .iter()
        .map(|t| t.and_then(|t| t.get(..4)).and_then(|y| y.parse::<i32>().ok()))
        .collect();

    let batch = replace_column(batch, DATE_FUNDED, Arc::new(text))?;
    append_column(&batch, YEAR_FUNDED, Arc::new(years))
}

/// `TOTAL DEVELOPMENT COST / PROJECT TOTAL UNITS`; null when either side is
/// missing or there are no units.
pub fn attach_cost_per_unit(batch: &RecordBatch) -> Result<RecordBatch> {
    let cost = f64_values(batch, TOTAL_DEVELOPMENT_COST)?;
    let units = i64_values(batch, PROJECT_TOTAL_UNITS)?;

    let per_unit: Float64Array = cost
        .iter()
        .zip(units.iter())
        .map(|(c, u)| match (c, u) {
            (Some(c), Some(u)) if *u != 0 => Some(c / *u as f64),
            _ => None,
        })
        .collect();
    append_column(batch, COST_PER_HOUSING_UNIT, Arc::new(per_unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Date32Builder;
    use arrow::datatypes::{DataType, Field, Schema};
    use chrono::NaiveDate;

    fn batch(
        projects: &[Option<&str>],
        costs: &[Option<f64>],
        units: &[Option<i64>],
    ) -> RecordBatch {
        let mut dates = Date32Builder::new();
        for _ in projects {
            dates.append_value(date_parser::to_date32(
                NaiveDate::from_ymd_opt(2010, 3, 15).unwrap(),
            ));
        }
        let schema = Schema::new(vec![
            Field::new(PROJECT_NUMBER, DataType::Utf8, true),
            Field::new(TOTAL_DEVELOPMENT_COST, DataType::Float64, true),
            Field::new(PROJECT_TOTAL_UNITS, DataType::Int64, true),
            Field::new(DATE_FUNDED, DataType::Date32, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(StringArray::from(projects.to_vec())),
                Arc::new(Float64Array::from(costs.to_vec())),
                Arc::new(Int64Array::from(units.to_vec())),
                Arc::new(dates.finish()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn counts_sites_per_project() {
        let b = batch(
            &[Some("P2"), Some("P1"), Some("P2"), None],
            &[None; 4],
            &[None; 4],
        );
        let counts = site_counts(&b).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["P1"], 1);
        assert_eq!(counts["P2"], 2);
    }

    #[test]
    fn keeps_first_row_and_sorts_lexically() {
        let b = batch(
            &[Some("P2"), Some("P10"), Some("P2"), None, Some("P1")],
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)],
            &[None; 5],
        );
        let deduped = first_per_project(&b).unwrap();

        let projects = string_values(&deduped, PROJECT_NUMBER).unwrap();
        let order: Vec<_> = projects.iter().flatten().collect();
        assert_eq!(order, vec!["P1", "P10", "P2"]);
        // first P2 row carried cost 1.0, not 3.0
        assert_eq!(
            f64_values(&deduped, TOTAL_DEVELOPMENT_COST).unwrap(),
            vec![Some(5.0), Some(2.0), Some(1.0)]
        );
    }

    #[test]
    fn site_counts_join_on_project_number() {
        let all = batch(
            &[Some("B"), Some("A"), Some("B"), Some("B")],
            &[None; 4],
            &[None; 4],
        );
        let counts = site_counts(&all).unwrap();
        let deduped = first_per_project(&all).unwrap();
        let out = attach_site_counts(&deduped, &counts).unwrap();

        assert_eq!(
            i64_values(&out, NUMBER_OF_SITES).unwrap(),
            vec![Some(1), Some(3)]
        );
    }

    #[test]
    fn cost_per_unit_handles_zero_and_missing() {
        let b = batch(
            &[Some("A"), Some("B"), Some("C"), Some("D")],
            &[Some(1_000_000.0), Some(5.0), None, Some(9.0)],
            &[Some(4), Some(0), Some(2), None],
        );
        let out = attach_cost_per_unit(&b).unwrap();
        assert_eq!(
            f64_values(&out, COST_PER_HOUSING_UNIT).unwrap(),
            vec![Some(250_000.0), None, None, None]
        );
    }

    #[test]
    fn year_and_display_date() {
        let b = batch(&[Some("A")], &[None], &[None]);
        let out = attach_year_funded(&b).unwrap();
        assert_eq!(
            string_values(&out, DATE_FUNDED).unwrap().value(0),
            "2010-03-15"
        );
        assert_eq!(i64_values(&out, YEAR_FUNDED).unwrap(), vec![Some(2010)]);
    }
}
