//! Complete output of a single projection run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::records::AnnualRecord;
use super::summary::Summary;

pub const CONFIG_VERSION: &str = "1.0";

/// Engine identifier stamped on every run
pub const ENGINE_ID: &str = concat!("retirement-projection-v", env!("CARGO_PKG_VERSION"));

/// Assumptions in force for a run, recorded for the reader of the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionSet {
    pub inflation_rate: f64,
    pub pool_growth_rate: f64,
    pub horizon_end_age: u32,
    pub pension_cola_rate: f64,
    pub social_security_cola: f64,
    pub tax_bracket_year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub calculation_date: DateTime<Utc>,
    pub config_version: String,
    pub engine: String,
    pub assumptions: AssumptionSet,
    /// Advisory notes; never fatal
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementResults {
    pub summary: Summary,
    pub annual_projections: Vec<AnnualRecord>,
    pub metadata: RunMetadata,
}
