//! Year-by-year retirement projection for a single scenario

mod state;
mod engine;
mod records;
mod results;
mod summary;
mod tax;
mod withdrawal;

pub use state::ProjectionState;
pub use engine::ProjectionEngine;
pub use records::AnnualRecord;
pub use results::{AssumptionSet, RetirementResults, RunMetadata, CONFIG_VERSION, ENGINE_ID};
pub use summary::{Summary, SummaryAggregator, SummaryInputs};
pub use tax::{TaxBreakdown, TaxEngine, YearIncome};
pub use withdrawal::WithdrawalEngine;
