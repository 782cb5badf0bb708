//! Year-by-year projection output

use serde::{Deserialize, Serialize};

use super::tax::{TaxBreakdown, YearIncome};

/// One simulated year of retirement (all amounts annual, nominal dollars)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRecord {
    // Timing
    pub year: i32,
    pub age: u32,

    // Income
    pub pension_income: f64,
    pub supplement_income: f64,
    pub social_security_income: f64,
    pub pool_withdrawal: f64,
    pub other_income: f64,
    pub gross_income: f64,

    // Deductions
    pub federal_tax: f64,
    pub regional_tax: f64,
    pub health_insurance: f64,
    pub life_insurance: f64,
    pub total_deductions: f64,
    pub net_income: f64,

    // Investment pool
    pub pool_start_balance: f64,
    pub pool_growth: f64,
    pub pool_end_balance: f64,

    // Rates
    /// Pension COLA applied this year (0 when no increase was paid)
    pub cola_rate: f64,
    pub inflation_rate: f64,
}

impl AnnualRecord {
    /// Start a record for `age` with the pool's start-of-year balance
    pub fn new(year: i32, age: u32, pool_start_balance: f64) -> Self {
        Self {
            year,
            age,
            pension_income: 0.0,
            supplement_income: 0.0,
            social_security_income: 0.0,
            pool_withdrawal: 0.0,
            other_income: 0.0,
            gross_income: 0.0,
            federal_tax: 0.0,
            regional_tax: 0.0,
            health_insurance: 0.0,
            life_insurance: 0.0,
            total_deductions: 0.0,
            net_income: 0.0,
            pool_start_balance,
            pool_growth: 0.0,
            pool_end_balance: pool_start_balance,
            cola_rate: 0.0,
            inflation_rate: 0.0,
        }
    }

    pub fn set_income(&mut self, income: &YearIncome) {
        self.pension_income = income.pension;
        self.supplement_income = income.supplement;
        self.social_security_income = income.social_security;
        self.pool_withdrawal = income.withdrawal;
        self.other_income = income.other;
        self.gross_income = income.gross();
    }

    /// Apply taxes and insurance, then settle total deductions and net income
    pub fn set_deductions(
        &mut self,
        taxes: &TaxBreakdown,
        health_insurance: f64,
        life_insurance: f64,
    ) {
        self.federal_tax = taxes.federal;
        self.regional_tax = taxes.regional;
        self.health_insurance = health_insurance;
        self.life_insurance = life_insurance;
        self.total_deductions =
            self.federal_tax + self.regional_tax + health_insurance + life_insurance;
        self.net_income = self.gross_income - self.total_deductions;
    }

    /// Growth accrues on the start balance; the end balance never goes negative
    pub fn set_pool_movement(&mut self, growth: f64) {
        self.pool_growth = growth;
        self.pool_end_balance = (self.pool_start_balance + growth - self.pool_withdrawal).max(0.0);
    }

    /// First year whose end balance hit zero from a positive start
    pub fn depletes_pool(&self) -> bool {
        self.pool_end_balance <= 0.0 && self.pool_start_balance > 0.0
    }
}
