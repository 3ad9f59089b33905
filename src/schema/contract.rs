// src/schema/contract.rs
use super::columns::*;
use crate::error::{PipelineError, Result};
use std::collections::HashSet;

/// Every column the pipeline reads, renames or drops. A header that lacks
/// any of them means the publisher changed the dataset and we stop.
pub const SOURCE_COLUMNS: &[&str] = &[
    APN,
    PROJECT_NUMBER,
    NAME,
    DEVELOPMENT_STAGE,
    CONSTRUCTION_TYPE,
    SITE_COUNCIL_DISTRICT,
    SITE_NUMBER_ABBREV,
    SITE_ADDRESS,
    SITE_COMMUNITY,
    SITE_UNITS,
    PROJECT_TOTAL_UNITS,
    HOUSING_TYPE,
    SUPPORTIVE_HOUSING,
    SH_UNITS_PER_SITE,
    DATE_FUNDED,
    LAHD_FUNDED,
    LEVERAGE,
    TAX_EXEMPT_CONDUIT_BOND,
    TDC,
    IN_SERVICE_DATE,
    DEVELOPER,
    MANAGEMENT_COMPANY,
    CONTACT_PHONE,
    PHOTO,
    JOBS,
    PROJECT_SUMMARY_URL,
    CONTRACT_NUMBERS,
    DATE_STAMP,
    SITE_LONGITUDE,
    SITE_LATITUDE,
    GPS_COORDS_ON_MAP,
];

/// `(from, to)` header renames, applied right after row filtering.
pub const RENAMES: &[(&str, &str)] = &[
    (TDC, TOTAL_DEVELOPMENT_COST),
    (SITE_NUMBER_ABBREV, SITE_NUMBER),
];

/// Rows where `column == value` are not affordable-housing production and
/// are removed before anything else happens.
pub const EXCLUSIONS: &[(&str, &str)] = &[
    (CONSTRUCTION_TYPE, "ACQUISITION ONLY"),
    (HOUSING_TYPE, "AT-RISK"),
];

/// Per-site and display-only columns with no meaning once the table is at
/// project granularity.
pub const PROJECT_DROP_COLUMNS: &[&str] = &[
    APN,
    NAME,
    SITE_ADDRESS,
    SITE_NUMBER,
    SITE_COMMUNITY,
    SITE_UNITS,
    SH_UNITS_PER_SITE,
    IN_SERVICE_DATE,
    PHOTO,
    PROJECT_SUMMARY_URL,
    CONTRACT_NUMBERS,
    DATE_STAMP,
    SITE_LONGITUDE,
    SITE_LATITUDE,
    GPS_COORDS_ON_MAP,
    DEVELOPER,
    MANAGEMENT_COMPANY,
    CONTACT_PHONE,
    SITE_COUNCIL_DISTRICT,
];

/// Typed groups of columns, each with one coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroup {
    /// Dollar amounts published with thousands separators. Parsed as `f64`.
    Monetary,
    /// Whole-number counts. Parsed as `i64`.
    Integer,
    /// Site latitude / longitude. Parsed as `f64`.
    Coordinate,
    /// Low-cardinality labels, dictionary encoded.
    Categorical,
}

impl ColumnGroup {
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ColumnGroup::Monetary => &[
                LAHD_FUNDED,
                LEVERAGE,
                TAX_EXEMPT_CONDUIT_BOND,
                TOTAL_DEVELOPMENT_COST,
            ],
            ColumnGroup::Integer => &[JOBS, PROJECT_TOTAL_UNITS, SITE_UNITS],
            ColumnGroup::Coordinate => &[SITE_LATITUDE, SITE_LONGITUDE],
            ColumnGroup::Categorical => &[
                APN,
                PROJECT_NUMBER,
                DEVELOPMENT_STAGE,
                CONSTRUCTION_TYPE,
                SITE_NUMBER,
                HOUSING_TYPE,
                SUPPORTIVE_HOUSING,
                IN_SERVICE_DATE,
            ],
        }
    }
}

/// Check a header row against [`SOURCE_COLUMNS`], reporting every missing
/// column at once.
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> Result<()> {
    let present: HashSet<&str> = headers.iter().map(|h| h.as_ref()).collect();
    let missing: Vec<String> = SOURCE_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_header_passes() {
        assert!(validate_headers(SOURCE_COLUMNS).is_ok());
    }

    #[test]
    fn reports_every_missing_column() {
        let headers: Vec<&str> = SOURCE_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != TDC && *c != JOBS)
            .collect();

        match validate_headers(&headers) {
            Err(PipelineError::MissingColumns(missing)) => {
                assert_eq!(missing, vec![TDC.to_string(), JOBS.to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn groups_refer_to_post_rename_names() {
        let renamed: HashSet<&str> = RENAMES.iter().map(|(from, _)| *from).collect();
        for group in [
            ColumnGroup::Monetary,
            ColumnGroup::Integer,
            ColumnGroup::Coordinate,
            ColumnGroup::Categorical,
        ] {
            for col in group.columns() {
                assert!(!renamed.contains(col), "{col} is renamed before coercion");
            }
        }
    }
}
