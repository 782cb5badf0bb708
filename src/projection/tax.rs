//! Federal and regional income tax estimates for one projection year

use crate::assumptions::{FederalTaxRules, JurisdictionRule, RegionalTaxRules};
use crate::profile::TaxInfo;

/// Income components for one projection year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearIncome {
    pub pension: f64,
    pub supplement: f64,
    pub social_security: f64,
    pub withdrawal: f64,
    pub other: f64,
}

impl YearIncome {
    pub fn gross(&self) -> f64 {
        self.pension + self.supplement + self.social_security + self.withdrawal + self.other
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBreakdown {
    pub taxable_social_security: f64,
    /// Federal taxable income after the standard deduction, floored at zero
    pub federal_taxable_income: f64,
    pub federal: f64,
    pub regional: f64,
}

impl TaxBreakdown {
    pub fn total(&self) -> f64 {
        self.federal + self.regional
    }
}

pub struct TaxEngine<'a> {
    federal: &'a FederalTaxRules,
    regional: &'a RegionalTaxRules,
    settings: &'a TaxInfo,
}

impl<'a> TaxEngine<'a> {
    pub fn new(
        federal: &'a FederalTaxRules,
        regional: &'a RegionalTaxRules,
        settings: &'a TaxInfo,
    ) -> Self {
        Self {
            federal,
            regional,
            settings,
        }
    }

    pub fn calculate(&self, income: &YearIncome, age: u32) -> TaxBreakdown {
        let taxable_social_security =
            self.taxable_social_security(income.social_security, income.gross());

        // The supplement stays out of the federal base
        let federal_taxable_income = (income.pension + income.withdrawal + taxable_social_security
            - self.federal.standard_deduction_at(age))
        .max(0.0);

        TaxBreakdown {
            taxable_social_security,
            federal_taxable_income,
            federal: self.federal.brackets.tax(federal_taxable_income),
            regional: self.regional_tax(income, age),
        }
    }

    /// Portion of the Social Security benefit subject to federal tax
    pub fn taxable_social_security(&self, benefit: f64, gross: f64) -> f64 {
        if benefit == 0.0 {
            return 0.0;
        }
        let t = &self.federal.social_security;
        let provisional = gross - benefit + 0.5 * benefit;

        if provisional <= t.lower {
            0.0
        } else if provisional <= t.upper {
            (benefit * t.middle_inclusion).min((provisional - t.lower) * t.middle_inclusion)
        } else {
            (benefit * t.upper_inclusion)
                .min((provisional - t.upper) * t.upper_inclusion + t.middle_tier_carryover)
        }
    }

    pub fn regional_tax(&self, income: &YearIncome, age: u32) -> f64 {
        let gross = income.gross();

        if let Some(rate) = self.settings.regional_rate.filter(|rate| *rate > 0.0) {
            let mut taxable = gross;
            if self.settings.pension_exempt {
                taxable -= income.pension;
            }
            if self.settings.social_security_exempt {
                taxable -= income.social_security;
            }
            return taxable.max(0.0) * rate;
        }

        let rule = self
            .settings
            .jurisdiction
            .as_deref()
            .and_then(|code| self.regional.rule_for(code));

        match rule {
            Some(JurisdictionRule::NoIncomeTax) => 0.0,
            Some(JurisdictionRule::WithdrawalOnly { rate }) => income.withdrawal * rate,
            Some(JurisdictionRule::RetirementIncomeExemptFrom { age: exempt_age, rate }) => {
                if age >= exempt_age {
                    income.withdrawal * rate
                } else {
                    gross * rate
                }
            }
            None => gross * self.regional.default_rate,
        }
    }
}
