//! Retiree profile data structures
//!
//! A `Profile` arrives fully validated and defaulted from the configuration layer.
//! The engine only ever reads it; comparison runs work on clones.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Pension plan family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    /// Federal Employees Retirement System (age/service tiered multiplier, supplement)
    #[serde(rename = "FERS")]
    Fers,
    /// Civil Service Retirement System (legacy tiered percentages)
    #[serde(rename = "CSRS")]
    Csrs,
}

impl Regime {
    pub fn is_fers(&self) -> bool {
        matches!(self, Regime::Fers)
    }
}

/// Survivor annuity election at retirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurvivorElection {
    None,
    Partial,
    Full,
}

/// How the investment pool is drawn down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStrategy {
    /// Fixed dollar amount per year, capped at the balance
    FixedAmount,
    /// Balance divided by the remaining-life-expectancy divisor for the age
    LifeExpectancy,
    /// Fixed percentage of the start-of-year balance
    Percentage,
    /// Entire balance in the retirement year
    LumpSum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub birth_date: NaiveDate,
    pub regime: Regime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentInfo {
    /// Current salary, used as the pre-retirement reference for the replacement ratio
    pub current_salary: f64,

    /// High-3 average salary (pension formula base)
    pub high3_salary: f64,

    /// Total creditable service in years (fractional years allowed)
    pub creditable_service_years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInfo {
    pub target_age: u32,

    /// When present, the retirement age is derived from this date and the birth date
    #[serde(default)]
    pub target_date: Option<NaiveDate>,

    pub survivor_election: SurvivorElection,
}

/// Thrift Savings Plan style investment pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolInfo {
    pub traditional_balance: f64,
    pub roth_balance: f64,

    /// Declared total balance; only used to flag inconsistent components
    #[serde(default)]
    pub current_balance: Option<f64>,

    pub strategy: WithdrawalStrategy,

    /// Annual amount for `FixedAmount`
    #[serde(default)]
    pub withdrawal_amount: Option<f64>,

    /// Annual rate for `Percentage` (falls back to the assumption default when absent)
    #[serde(default)]
    pub withdrawal_rate: Option<f64>,

    /// Assumed annual growth of the pool
    pub growth_rate: f64,
}

impl PoolInfo {
    /// Balance actually simulated: traditional plus Roth
    pub fn total(&self) -> f64 {
        self.traditional_balance + self.roth_balance
    }

    /// Declared total when it disagrees with the component sum
    pub fn declared_total_mismatch(&self) -> Option<f64> {
        self.current_balance
            .filter(|declared| (declared - self.total()).abs() > 0.005)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSecurityInfo {
    /// Monthly benefit at full retirement age (PIA)
    pub full_benefit: f64,

    pub claiming_age: u32,

    /// Monthly benefit estimates by claiming age, e.g. from an SSA statement
    #[serde(default)]
    pub point_estimates: BTreeMap<u32, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthInsuranceInfo {
    /// Annual premium in retirement; the assumption default applies when absent
    #[serde(default)]
    pub retirement_premium: Option<f64>,

    /// Annual premium growth
    #[serde(default)]
    pub premium_growth: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxInfo {
    /// Two-letter jurisdiction code (e.g. "VA")
    #[serde(default)]
    pub jurisdiction: Option<String>,

    /// Flat regional rate; overrides the jurisdiction table when positive
    #[serde(default)]
    pub regional_rate: Option<f64>,

    #[serde(default)]
    pub pension_exempt: bool,

    #[serde(default)]
    pub social_security_exempt: bool,
}

/// Complete retiree input profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub personal: PersonalInfo,
    pub employment: EmploymentInfo,
    pub retirement: RetirementInfo,
    pub pool: PoolInfo,
    pub social_security: SocialSecurityInfo,

    #[serde(default)]
    pub health_insurance: HealthInsuranceInfo,

    #[serde(default)]
    pub tax: TaxInfo,
}

impl Profile {
    pub fn regime(&self) -> Regime {
        self.personal.regime
    }

    pub fn birth_year(&self) -> i32 {
        self.personal.birth_date.year()
    }

    pub fn service_years(&self) -> f64 {
        self.employment.creditable_service_years
    }

    /// Age at retirement: from the target date when one is given, else the target age
    pub fn retirement_age(&self) -> EngineResult<u32> {
        match self.retirement.target_date {
            Some(date) => age_on(self.personal.birth_date, date).ok_or(
                EngineError::InvalidRetirementDate {
                    retirement_date: date,
                    birth_date: self.personal.birth_date,
                },
            ),
            None => Ok(self.retirement.target_age),
        }
    }

    /// Independent copy retiring at `age` (any target date is dropped)
    pub fn with_retirement_age(&self, age: u32) -> Profile {
        let mut copy = self.clone();
        copy.retirement.target_age = age;
        copy.retirement.target_date = None;
        copy
    }

    /// Calendar year in which the retiree attains `age`
    pub fn calendar_year_at(&self, age: u32) -> i32 {
        self.birth_year() + age as i32
    }
}

/// Completed years between `birth_date` and `date`, or `None` if `date` is earlier
pub fn age_on(birth_date: NaiveDate, date: NaiveDate) -> Option<u32> {
    if date < birth_date {
        return None;
    }
    let mut years = date.year() - birth_date.year();
    if (date.month(), date.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
