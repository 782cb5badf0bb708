//! Projection assumptions: economic rates, benefit rules and lookup tables

mod mra;
mod life_expectancy;
mod tax_tables;
pub mod loader;

pub use mra::{MraBand, MraTable};
pub use life_expectancy::{DivisorBand, LifeExpectancyTable};
pub use tax_tables::{
    BracketTable, FederalTaxRules, JurisdictionRule, RegionalTaxRules, SsTaxThresholds,
    TaxBracket,
};
pub use loader::{AssumptionLoadError, LoadedAssumptions};

use std::path::Path;

/// Economic rates and horizon used by the projection loop
#[derive(Debug, Clone)]
pub struct EconomicAssumptions {
    /// Last simulated age (inclusive)
    pub horizon_end_age: u32,
    pub inflation_rate: f64,
    /// Nominal COLA input before any regime cap
    pub pension_cola_rate: f64,
    pub social_security_cola: f64,
    /// Percentage-strategy rate when the profile gives none (the "4% rule")
    pub default_withdrawal_rate: f64,
    pub tax_bracket_year: i32,
}

impl Default for EconomicAssumptions {
    fn default() -> Self {
        Self {
            horizon_end_age: 95,
            inflation_rate: 0.025,
            pension_cola_rate: 0.025,
            social_security_cola: 0.025,
            default_withdrawal_rate: 0.04,
            tax_bracket_year: 2025,
        }
    }
}

/// Social Security claiming rules
#[derive(Debug, Clone)]
pub struct SocialSecurityRules {
    pub full_retirement_age: u32,
    pub earliest_claiming_age: u32,
    pub latest_claiming_age: u32,
    /// Months early reduced at the first-tier rate before the second tier starts
    pub first_tier_months: u32,
}

impl Default for SocialSecurityRules {
    fn default() -> Self {
        Self {
            full_retirement_age: 67,
            earliest_claiming_age: 62,
            latest_claiming_age: 70,
            first_tier_months: 36,
        }
    }
}

/// Insurance premiums deducted in retirement
#[derive(Debug, Clone)]
pub struct InsuranceAssumptions {
    /// Annual FEHB premium when the profile gives none ($400/month)
    pub default_health_premium: f64,
    pub default_health_growth: f64,
    /// Flat annual FEGLI premium ($50/month)
    pub life_insurance_premium: f64,
}

impl Default for InsuranceAssumptions {
    fn default() -> Self {
        Self {
            default_health_premium: 4_800.0,
            default_health_growth: 0.03,
            life_insurance_premium: 600.0,
        }
    }
}

/// Container for all projection assumptions
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub economic: EconomicAssumptions,
    pub social_security: SocialSecurityRules,
    pub insurance: InsuranceAssumptions,
    pub mra: MraTable,
    pub life_expectancy: LifeExpectancyTable,
    pub federal_tax: FederalTaxRules,
    pub regional_tax: RegionalTaxRules,
}

impl Assumptions {
    /// Built-in 2025 federal assumptions
    pub fn default_federal() -> Self {
        Self::default()
    }

    /// Load the lookup tables from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, AssumptionLoadError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load the lookup tables from CSV files in a specific directory; scalar
    /// assumptions keep their built-in values
    pub fn from_csv_path(path: &Path) -> Result<Self, AssumptionLoadError> {
        let loaded = LoadedAssumptions::load_from(path)?;

        let mut assumptions = Self::default_federal();
        assumptions.mra = loaded.mra;
        assumptions.life_expectancy = loaded.life_expectancy;
        assumptions.federal_tax.brackets = loaded.tax_brackets;
        Ok(assumptions)
    }
}
