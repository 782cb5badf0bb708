//! Error types for the projection engine
//!
//! Only hard failures live here. Soft anomalies (inconsistent pool totals, low
//! salary history, early-retirement reductions) are collected as warnings on the
//! run metadata instead.

use chrono::NaiveDate;
use thiserror::Error;

use crate::profile::WithdrawalStrategy;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A comparison age could not be parsed as a whole number of years
    #[error("invalid comparison age '{value}': {source}")]
    InvalidComparisonAge {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("retirement age {retirement_age} is beyond the projection horizon ending at age {end_age}")]
    HorizonExceeded { retirement_age: u32, end_age: u32 },

    #[error("retirement date {retirement_date} precedes birth date {birth_date}")]
    InvalidRetirementDate {
        retirement_date: NaiveDate,
        birth_date: NaiveDate,
    },

    /// Strategy tag and its parameters disagree (e.g. a fixed-amount strategy with no amount)
    #[error("withdrawal strategy {strategy:?} is inconsistent with its parameters: {detail}")]
    InconsistentWithdrawal {
        strategy: WithdrawalStrategy,
        detail: String,
    },

    #[error("claiming age {age} is outside the supported range {min}..={max}")]
    ClaimingAgeOutOfRange { age: u32, min: u32, max: u32 },
}

pub type EngineResult<T> = Result<T, EngineError>;
