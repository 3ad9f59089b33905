use crate::error::{PipelineError, Result};
use crate::process::utils::{f64_values, i64_values, string_values};
use crate::schema::columns::*;
use arrow::{
    array::{Array, StringArray},
    record_batch::RecordBatch,
};
use serde::Serialize;

/// One cleaned project, read back out of a project table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ProjectRecord {
    pub project_number: String,
    pub development_stage: String,
    pub construction_type: String,
    pub project_total_units: i64,
    pub housing_type: String,
    pub supportive_housing: String,
    /// `YYYY-MM-DD`
    pub date_funded: String,
    pub lahd_funded: f64,
    pub leverage: f64,
    pub tax_exempt_conduit_bond: f64,
    pub total_development_cost: f64,
    /// `None` when read from the table without the jobs column.
    pub jobs: Option<i64>,
    pub number_of_sites: i64,
    pub year_funded: i32,
    pub cost_per_housing_unit: f64,
}

impl ProjectRecord {
    /// Read every row of a terminal project table. The table must be free of
    /// nulls (it is, after null-row removal).
    pub fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        let project_number = string_values(batch, PROJECT_NUMBER)?;
        let development_stage = string_values(batch, DEVELOPMENT_STAGE)?;
        let construction_type = string_values(batch, CONSTRUCTION_TYPE)?;
        let project_total_units = i64_values(batch, PROJECT_TOTAL_UNITS)?;
        let housing_type = string_values(batch, HOUSING_TYPE)?;
        let supportive_housing = string_values(batch, SUPPORTIVE_HOUSING)?;
        let date_funded = string_values(batch, DATE_FUNDED)?;
        let lahd_funded = f64_values(batch, LAHD_FUNDED)?;
        let leverage = f64_values(batch, LEVERAGE)?;
        let bond = f64_values(batch, TAX_EXEMPT_CONDUIT_BOND)?;
        let tdc = f64_values(batch, TOTAL_DEVELOPMENT_COST)?;
        let jobs = match batch.column_by_name(JOBS) {
            Some(_) => i64_values(batch, JOBS)?,
            None => vec![None; batch.num_rows()],
        };
        let sites = i64_values(batch, NUMBER_OF_SITES)?;
        let years = i64_values(batch, YEAR_FUNDED)?;
        let per_unit = f64_values(batch, COST_PER_HOUSING_UNIT)?;

        let text = |arr: &StringArray, name: &str, row: usize| -> Result<String> {
            if arr.is_null(row) {
                Err(null_value(name, row))
            } else {
                Ok(arr.value(row).to_string())
            }
        };

        (0..batch.num_rows())
            .map(|row| -> Result<ProjectRecord> {
                Ok(ProjectRecord {
                    project_number: text(&project_number, PROJECT_NUMBER, row)?,
                    development_stage: text(&development_stage, DEVELOPMENT_STAGE, row)?,
                    construction_type: text(&construction_type, CONSTRUCTION_TYPE, row)?,
                    project_total_units: required(
                        project_total_units[row],
                        PROJECT_TOTAL_UNITS,
                        row,
                    )?,
                    housing_type: text(&housing_type, HOUSING_TYPE, row)?,
                    supportive_housing: text(&supportive_housing, SUPPORTIVE_HOUSING, row)?,
                    date_funded: text(&date_funded, DATE_FUNDED, row)?,
                    lahd_funded: required(lahd_funded[row], LAHD_FUNDED, row)?,
                    leverage: required(leverage[row], LEVERAGE, row)?,
                    tax_exempt_conduit_bond: required(
                        bond[row],
                        TAX_EXEMPT_CONDUIT_BOND,
                        row,
                    )?,
                    total_development_cost: required(tdc[row], TOTAL_DEVELOPMENT_COST, row)?,
                    jobs: jobs[row],
                    number_of_sites: required(sites[row], NUMBER_OF_SITES, row)?,
                    year_funded: required(years[row], YEAR_FUNDED, row)? as i32,
                    cost_per_housing_unit: required(
                        per_unit[row],
                        COST_PER_HOUSING_UNIT,
                        row,
                    )?,
                })
            })
            .collect()
    }
}

fn required<T>(value: Option<T>, name: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| null_value(name, row))
}

fn null_value(name: &str, row: usize) -> PipelineError {
    PipelineError::NullValue {
        column: name.to_string(),
        row,
    }
}
