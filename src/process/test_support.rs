//! Small CSV fixtures shaped like the published dataset.

use crate::schema::{columns::*, contract::SOURCE_COLUMNS};
use std::collections::HashMap;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,lahd_housing=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// One published site row. Defaults describe a complete, family, new
/// construction site funded 03/15/2010.
#[derive(Debug, Clone)]
pub struct Row {
    values: HashMap<&'static str, String>,
}

impl Row {
    pub fn new(project: &str, site: &str) -> Self {
        let defaults: [(&'static str, String); 31] = [
            (APN, format!("5100-{project}-{site}")),
            (PROJECT_NUMBER, project.to_string()),
            (NAME, format!("Casa {project}")),
            (DEVELOPMENT_STAGE, "IN-SERVICE".into()),
            (CONSTRUCTION_TYPE, "NEW CONSTRUCTION".into()),
            (SITE_COUNCIL_DISTRICT, "1".into()),
            (SITE_NUMBER_ABBREV, site.to_string()),
            (SITE_ADDRESS, format!("{site}00 W MAIN ST")),
            (SITE_COMMUNITY, "Westlake".into()),
            (SITE_UNITS, "50".into()),
            (PROJECT_TOTAL_UNITS, "100".into()),
            (HOUSING_TYPE, "FAMILY".into()),
            (SUPPORTIVE_HOUSING, "NO".into()),
            (SH_UNITS_PER_SITE, "0".into()),
            (DATE_FUNDED, "03/15/2010".into()),
            (LAHD_FUNDED, "1,000,000".into()),
            (LEVERAGE, "24,000,000".into()),
            (TAX_EXEMPT_CONDUIT_BOND, "0".into()),
            (TDC, "25,000,000".into()),
            (IN_SERVICE_DATE, "06/01/2012".into()),
            (DEVELOPER, "Example Housing Partners".into()),
            (MANAGEMENT_COMPANY, "Example Management".into()),
            (CONTACT_PHONE, "(213) 555-0100".into()),
            (PHOTO, "https://example.org/photo.jpg".into()),
            (JOBS, "120".into()),
            (PROJECT_SUMMARY_URL, "https://example.org/summary".into()),
            (CONTRACT_NUMBERS, "C-1".into()),
            (DATE_STAMP, "06/02/2025 12:00:00 AM".into()),
            (SITE_LONGITUDE, "-118.27".into()),
            (SITE_LATITUDE, "34.05".into()),
            (GPS_COORDS_ON_MAP, "(34.05, -118.27)".into()),
        ];
        Self {
            values: defaults.into_iter().collect(),
        }
    }

    pub fn set(mut self, column: &'static str, value: &str) -> Self {
        self.values.insert(column, value.to_string());
        self
    }

    pub fn construction(self, v: &str) -> Self {
        self.set(CONSTRUCTION_TYPE, v)
    }

    pub fn housing(self, v: &str) -> Self {
        self.set(HOUSING_TYPE, v)
    }

    pub fn supportive(self, v: &str) -> Self {
        self.set(SUPPORTIVE_HOUSING, v)
    }

    pub fn tdc(self, v: &str) -> Self {
        self.set(TDC, v)
    }

    pub fn units(self, v: &str) -> Self {
        self.set(PROJECT_TOTAL_UNITS, v)
    }

    pub fn jobs(self, v: &str) -> Self {
        self.set(JOBS, v)
    }

    pub fn date_funded(self, v: &str) -> Self {
        self.set(DATE_FUNDED, v)
    }

    pub fn lahd_funded(self, v: &str) -> Self {
        self.set(LAHD_FUNDED, v)
    }
}

/// Header plus one line per row, every cell quoted.
pub fn csv_with_rows(rows: &[Row]) -> String {
    let quote = |v: &str| format!("\"{}\"", v.replace('"', "\"\""));

    let mut out = SOURCE_COLUMNS
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');

    for row in rows {
        let line = SOURCE_COLUMNS
            .iter()
            .map(|c| quote(row.values.get(c).map(String::as_str).unwrap_or("")))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
