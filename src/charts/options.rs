// src/charts/options.rs
//! The dashboard's dropdown / radio choices, each naming a column.

use crate::schema::columns::*;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// Accepts the column name in any case, with `-` or `_` in place of spaces:
/// `"HOUSING TYPE"`, `"housing-type"` and `"housing_type"` are the same.
fn normalize(s: &str) -> String {
    s.trim().replace(['-', '_'], " ").to_uppercase()
}

fn parse_choice<T: Copy>(s: &str, all: &[T], column: fn(T) -> &'static str) -> Option<T> {
    let wanted = normalize(s);
    all.iter().copied().find(|c| column(*c) == wanted)
}

/// Label columns used to colour or group charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HousingCategory {
    HousingType,
    ConstructionType,
    SupportiveHousing,
}

impl HousingCategory {
    pub const ALL: [HousingCategory; 3] = [
        HousingCategory::HousingType,
        HousingCategory::ConstructionType,
        HousingCategory::SupportiveHousing,
    ];

    pub fn column(self) -> &'static str {
        match self {
            HousingCategory::HousingType => HOUSING_TYPE,
            HousingCategory::ConstructionType => CONSTRUCTION_TYPE,
            HousingCategory::SupportiveHousing => SUPPORTIVE_HOUSING,
        }
    }
}

/// Where a project's money came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundingSource {
    LahdFunded,
    Leverage,
    TaxExemptConduitBond,
    TotalDevelopmentCost,
}

impl FundingSource {
    pub const ALL: [FundingSource; 4] = [
        FundingSource::LahdFunded,
        FundingSource::Leverage,
        FundingSource::TaxExemptConduitBond,
        FundingSource::TotalDevelopmentCost,
    ];

    pub fn column(self) -> &'static str {
        match self {
            FundingSource::LahdFunded => LAHD_FUNDED,
            FundingSource::Leverage => LEVERAGE,
            FundingSource::TaxExemptConduitBond => TAX_EXEMPT_CONDUIT_BOND,
            FundingSource::TotalDevelopmentCost => TOTAL_DEVELOPMENT_COST,
        }
    }
}

/// What a project produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectMetric {
    ProjectTotalUnits,
    Jobs,
    CostPerHousingUnit,
}

impl ProjectMetric {
    pub const ALL: [ProjectMetric; 3] = [
        ProjectMetric::ProjectTotalUnits,
        ProjectMetric::Jobs,
        ProjectMetric::CostPerHousingUnit,
    ];

    pub fn column(self) -> &'static str {
        match self {
            ProjectMetric::ProjectTotalUnits => PROJECT_TOTAL_UNITS,
            ProjectMetric::Jobs => JOBS,
            ProjectMetric::CostPerHousingUnit => COST_PER_HOUSING_UNIT,
        }
    }
}

/// Anything the box plot can summarise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Metric(ProjectMetric),
    Funding(FundingSource),
}

impl Measure {
    pub fn column(self) -> &'static str {
        match self {
            Measure::Metric(m) => m.column(),
            Measure::Funding(f) => f.column(),
        }
    }
}

/// Marker size on the site map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapSize {
    None,
    ProjectTotalUnits,
    Funding(FundingSource),
}

impl MapSize {
    pub fn column(self) -> Option<&'static str> {
        match self {
            MapSize::None => None,
            MapSize::ProjectTotalUnits => Some(PROJECT_TOTAL_UNITS),
            MapSize::Funding(f) => Some(f.column()),
        }
    }
}

/// Base map tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapStyle {
    #[default]
    OpenStreetMap,
    CartoVoyager,
    CartoDarkmatter,
    SatelliteStreets,
}

impl MapStyle {
    pub const ALL: [MapStyle; 4] = [
        MapStyle::OpenStreetMap,
        MapStyle::CartoVoyager,
        MapStyle::CartoDarkmatter,
        MapStyle::SatelliteStreets,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MapStyle::OpenStreetMap => "open-street-map",
            MapStyle::CartoVoyager => "carto-voyager",
            MapStyle::CartoDarkmatter => "carto-darkmatter",
            MapStyle::SatelliteStreets => "satellite-streets",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownOption {}

fn unknown(kind: &'static str, value: &str) -> UnknownOption {
    UnknownOption {
        kind,
        value: value.to_string(),
    }
}

impl FromStr for HousingCategory {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, &Self::ALL, Self::column).ok_or_else(|| unknown("housing category", s))
    }
}

impl FromStr for FundingSource {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, &Self::ALL, Self::column).ok_or_else(|| unknown("funding source", s))
    }
}

impl FromStr for ProjectMetric {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(s, &Self::ALL, Self::column).ok_or_else(|| unknown("project metric", s))
    }
}

impl FromStr for Measure {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ProjectMetric>()
            .map(Measure::Metric)
            .or_else(|_| s.parse::<FundingSource>().map(Measure::Funding))
            .map_err(|_| unknown("measure", s))
    }
}

impl FromStr for MapSize {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "NONE" => Ok(MapSize::None),
            c if c == PROJECT_TOTAL_UNITS => Ok(MapSize::ProjectTotalUnits),
            _ => s
                .parse::<FundingSource>()
                .map(MapSize::Funding)
                .map_err(|_| unknown("map size", s)),
        }
    }
}

impl FromStr for MapStyle {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| unknown("map style", s))
    }
}

macro_rules! display_as_column {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.column())
            }
        })*
    };
}

display_as_column!(HousingCategory, FundingSource, ProjectMetric, Measure);

impl fmt::Display for MapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column().unwrap_or("NONE"))
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
