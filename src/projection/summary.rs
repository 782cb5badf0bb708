//! Reduction of annual records into headline figures

use serde::{Deserialize, Serialize};

use super::records::AnnualRecord;
use crate::benefits::{PensionResult, SocialSecurityResult, SupplementResult};

/// Headline figures for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub retirement_age: u32,

    // Pension
    pub monthly_pension: f64,
    pub annual_pension: f64,
    /// Early-retirement reduction as a fraction
    pub pension_reduction: f64,
    /// Annual survivor election cost
    pub survivor_cost: f64,
    pub net_monthly_pension: f64,

    // Supplement
    pub supplement_monthly: f64,
    pub supplement_end_age: Option<u32>,

    // Social Security
    pub monthly_social_security: f64,
    pub social_security_start_age: u32,

    // Investment pool
    /// Traditional + Roth at retirement; a declared total is never used here
    pub pool_starting_balance: f64,
    /// Age of the year the pool ran out; `None` if it lasts the whole horizon
    pub pool_depletion_age: Option<u32>,

    // Income
    pub first_year_income: f64,
    pub lifetime_income: f64,
    /// First-year net income over current salary
    pub replacement_ratio: f64,
}

/// Benefit inputs the summary reports alongside the records
pub struct SummaryInputs<'a> {
    pub retirement_age: u32,
    pub pension: &'a PensionResult,
    pub social_security: &'a SocialSecurityResult,
    pub supplement: &'a SupplementResult,
    pub pool_starting_balance: f64,
    pub reference_salary: f64,
}

pub struct SummaryAggregator;

impl SummaryAggregator {
    pub fn summarize(inputs: &SummaryInputs<'_>, records: &[AnnualRecord]) -> Summary {
        let first_year_income = records.first().map(|r| r.net_income).unwrap_or(0.0);
        let lifetime_income: f64 = records.iter().map(|r| r.net_income).sum();

        let replacement_ratio = if inputs.reference_salary > 0.0 {
            first_year_income / inputs.reference_salary
        } else {
            0.0
        };

        let supplement = inputs.supplement;
        let final_annuity = inputs.pension.final_annuity;

        Summary {
            retirement_age: inputs.retirement_age,
            monthly_pension: final_annuity / 12.0,
            annual_pension: final_annuity,
            pension_reduction: inputs.pension.reduction,
            survivor_cost: inputs.pension.survivor_cost,
            net_monthly_pension: final_annuity / 12.0,
            supplement_monthly: if supplement.eligible { supplement.monthly_amount } else { 0.0 },
            supplement_end_age: supplement.eligible.then_some(supplement.end_age),
            monthly_social_security: inputs.social_security.monthly_benefit,
            social_security_start_age: inputs.social_security.claiming_age,
            pool_starting_balance: inputs.pool_starting_balance,
            pool_depletion_age: Self::depletion_age(records),
            first_year_income,
            lifetime_income,
            replacement_ratio,
        }
    }

    pub fn depletion_age(records: &[AnnualRecord]) -> Option<u32> {
        records.iter().find(|r| r.depletes_pool()).map(|r| r.age)
    }
}
