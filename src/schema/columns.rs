// src/schema/columns.rs
//! Exact header names, as published by data.lacity.org.

pub const APN: &str = "APN";
pub const PROJECT_NUMBER: &str = "PROJECT NUMBER";
pub const NAME: &str = "NAME";
pub const DEVELOPMENT_STAGE: &str = "DEVELOPMENT STAGE";
pub const CONSTRUCTION_TYPE: &str = "CONSTRUCTION TYPE";
pub const SITE_COUNCIL_DISTRICT: &str = "SITE COUNCIL DISTRICT";
pub const SITE_NUMBER_ABBREV: &str = "SITE #";
pub const SITE_NUMBER: &str = "SITE NUMBER";
pub const SITE_ADDRESS: &str = "SITE ADDRESS";
pub const SITE_COMMUNITY: &str = "SITE COMMUNITY";
pub const SITE_UNITS: &str = "SITE UNITS";
pub const PROJECT_TOTAL_UNITS: &str = "PROJECT TOTAL UNITS";
pub const HOUSING_TYPE: &str = "HOUSING TYPE";
pub const SUPPORTIVE_HOUSING: &str = "SUPPORTIVE HOUSING";
pub const SH_UNITS_PER_SITE: &str = "SH UNITS PER SITE";
pub const DATE_FUNDED: &str = "DATE FUNDED";
pub const LAHD_FUNDED: &str = "LAHD FUNDED";
pub const LEVERAGE: &str = "LEVERAGE";
pub const TAX_EXEMPT_CONDUIT_BOND: &str = "TAX EXEMPT CONDUIT BOND";
pub const TDC: &str = "TDC";
pub const TOTAL_DEVELOPMENT_COST: &str = "TOTAL DEVELOPMENT COST";
pub const IN_SERVICE_DATE: &str = "IN-SERVICE DATE";
pub const DEVELOPER: &str = "DEVELOPER";
pub const MANAGEMENT_COMPANY: &str = "MANAGEMENT COMPANY";
pub const CONTACT_PHONE: &str = "CONTACT PHONE";
pub const PHOTO: &str = "PHOTO";
pub const JOBS: &str = "JOBS";
pub const PROJECT_SUMMARY_URL: &str = "PROJECT SUMMARY URL";
pub const CONTRACT_NUMBERS: &str = "CONTRACT NUMBERS";
pub const DATE_STAMP: &str = "DATE STAMP";
pub const SITE_LONGITUDE: &str = "SITE LONGITUDE";
pub const SITE_LATITUDE: &str = "SITE LATITUDE";
pub const GPS_COORDS_ON_MAP: &str = "GPS_COORDS ON MAP";

// derived
pub const NUMBER_OF_SITES: &str = "NUMBER OF SITES";
pub const YEAR_FUNDED: &str = "YEAR FUNDED";
pub const COST_PER_HOUSING_UNIT: &str = "COST PER HOUSING UNIT";
