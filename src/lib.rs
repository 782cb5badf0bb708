//! Retirement Projection - lifetime income engine for FERS and CSRS federal retirees
//!
//! This library provides:
//! - Pension annuity, Social Security and FERS supplement calculations
//! - Year-by-year projection of income, investment pool drawdown, taxes and insurance
//! - Summary figures and advisory warnings per scenario
//! - Parallel comparison of retirement ages
//!
//! ```ignore
//! use retirement_projection::{templates, ScenarioRunner};
//!
//! let runner = ScenarioRunner::new();
//! let results = runner.run(&templates::basic_fers())?;
//! let comparison = runner.compare_retirement_ages(&templates::basic_fers(), &["60", "62", "65"])?;
//! ```

pub mod error;
pub mod profile;
pub mod assumptions;
pub mod benefits;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{EngineError, EngineResult};
pub use profile::{templates, Profile, Regime, SurvivorElection, WithdrawalStrategy};
pub use assumptions::{Assumptions, AssumptionLoadError};
pub use projection::{AnnualRecord, ProjectionEngine, RetirementResults, Summary};
pub use scenario::{ComparisonMetrics, ComparisonResult, ScenarioRunner};
