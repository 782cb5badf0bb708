//! Federal and regional tax tables
//!
//! Simplified 2025 single-filer figures. Brackets and jurisdiction special cases are
//! plain data so they can be audited and extended without touching the tax engine.

use std::collections::BTreeMap;

/// One marginal band: income in `[lower, upper)` is taxed at `rate`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub lower: f64,
    /// `f64::INFINITY` for the open-ended top band
    pub upper: f64,
    pub rate: f64,
}

/// Ordered, non-overlapping progressive brackets
#[derive(Debug, Clone)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl Default for BracketTable {
    fn default() -> Self {
        Self {
            brackets: vec![
                TaxBracket { lower: 0.0, upper: 11_000.0, rate: 0.10 },
                TaxBracket { lower: 11_000.0, upper: 44_725.0, rate: 0.12 },
                TaxBracket { lower: 44_725.0, upper: 95_375.0, rate: 0.22 },
                TaxBracket { lower: 95_375.0, upper: 182_050.0, rate: 0.24 },
                TaxBracket { lower: 182_050.0, upper: 231_250.0, rate: 0.32 },
                TaxBracket { lower: 231_250.0, upper: 578_125.0, rate: 0.35 },
                TaxBracket { lower: 578_125.0, upper: f64::INFINITY, rate: 0.37 },
            ],
        }
    }
}

impl BracketTable {
    /// Create from loaded brackets (already ordered and validated by the loader)
    pub fn from_brackets(brackets: Vec<TaxBracket>) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Tax on `income` summed band by band
    pub fn tax(&self, income: f64) -> f64 {
        let mut tax = 0.0;
        for bracket in &self.brackets {
            if income <= bracket.lower {
                break;
            }
            tax += (income.min(bracket.upper) - bracket.lower) * bracket.rate;
        }
        tax
    }
}

/// Provisional-income thresholds for taxing Social Security
#[derive(Debug, Clone)]
pub struct SsTaxThresholds {
    pub lower: f64,
    pub upper: f64,
    /// Share of the benefit (and of the excess) taxable between the thresholds
    pub middle_inclusion: f64,
    /// Share of the benefit (and of the excess) taxable above the upper threshold
    pub upper_inclusion: f64,
    /// Taxable amount carried over from the middle tier once above the upper threshold
    pub middle_tier_carryover: f64,
}

impl Default for SsTaxThresholds {
    fn default() -> Self {
        Self {
            lower: 25_000.0,
            upper: 34_000.0,
            middle_inclusion: 0.50,
            upper_inclusion: 0.85,
            middle_tier_carryover: 4_500.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FederalTaxRules {
    pub brackets: BracketTable,
    pub standard_deduction: f64,
    /// Added to the standard deduction from `senior_age`
    pub senior_additional_deduction: f64,
    pub senior_age: u32,
    pub social_security: SsTaxThresholds,
}

impl Default for FederalTaxRules {
    fn default() -> Self {
        Self {
            brackets: BracketTable::default(),
            standard_deduction: 14_700.0,
            senior_additional_deduction: 1_850.0,
            senior_age: 65,
            social_security: SsTaxThresholds::default(),
        }
    }
}

impl FederalTaxRules {
    pub fn standard_deduction_at(&self, age: u32) -> f64 {
        if age >= self.senior_age {
            self.standard_deduction + self.senior_additional_deduction
        } else {
            self.standard_deduction
        }
    }
}

/// How a listed jurisdiction taxes retirement income when no flat rate is configured
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JurisdictionRule {
    NoIncomeTax,
    /// Only the pool withdrawal is taxed
    WithdrawalOnly { rate: f64 },
    /// Gross income is taxed until `age`; from then on only the withdrawal
    RetirementIncomeExemptFrom { age: u32, rate: f64 },
}

#[derive(Debug, Clone)]
pub struct RegionalTaxRules {
    jurisdictions: BTreeMap<String, JurisdictionRule>,
    /// Flat estimate on gross income for unlisted jurisdictions
    pub default_rate: f64,
}

impl Default for RegionalTaxRules {
    fn default() -> Self {
        let mut jurisdictions = BTreeMap::new();
        for code in ["FL", "TX", "NV", "AK", "SD", "WY", "WA", "TN", "NH"] {
            jurisdictions.insert(code.to_string(), JurisdictionRule::NoIncomeTax);
        }
        jurisdictions.insert(
            "PA".to_string(),
            JurisdictionRule::WithdrawalOnly { rate: 0.0307 },
        );
        jurisdictions.insert(
            "IL".to_string(),
            JurisdictionRule::RetirementIncomeExemptFrom { age: 65, rate: 0.0495 },
        );

        Self {
            jurisdictions,
            default_rate: 0.05,
        }
    }
}

impl RegionalTaxRules {
    /// Rule for a jurisdiction code, case-insensitive; `None` when unlisted
    pub fn rule_for(&self, code: &str) -> Option<JurisdictionRule> {
        self.jurisdictions.get(&code.trim().to_ascii_uppercase()).copied()
    }

    pub fn set_rule(&mut self, code: &str, rule: JurisdictionRule) {
        self.jurisdictions.insert(code.trim().to_ascii_uppercase(), rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bracket_tax() {
        let table = BracketTable::default();

        assert_eq!(table.tax(0.0), 0.0);
        assert_abs_diff_eq!(table.tax(10_000.0), 1_000.0, epsilon = 1e-9);
        // 1,100 + 4,047 + 1,160.50
        assert_abs_diff_eq!(table.tax(50_000.0), 6_307.5, epsilon = 1e-9);
    }

    #[test]
    fn test_top_bracket_is_open_ended() {
        let table = BracketTable::default();
        let at_top = table.tax(578_125.0);
        let above = table.tax(678_125.0);

        assert_abs_diff_eq!(above - at_top, 37_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_standard_deduction_by_age() {
        let rules = FederalTaxRules::default();

        assert_eq!(rules.standard_deduction_at(64), 14_700.0);
        assert_eq!(rules.standard_deduction_at(65), 16_550.0);
    }

    #[test]
    fn test_jurisdiction_lookup() {
        let mut rules = RegionalTaxRules::default();

        assert_eq!(rules.rule_for("fl"), Some(JurisdictionRule::NoIncomeTax));
        assert_eq!(
            rules.rule_for("PA"),
            Some(JurisdictionRule::WithdrawalOnly { rate: 0.0307 })
        );
        assert_eq!(rules.rule_for("VA"), None);

        rules.set_rule("va", JurisdictionRule::WithdrawalOnly { rate: 0.01 });
        assert_eq!(
            rules.rule_for("VA"),
            Some(JurisdictionRule::WithdrawalOnly { rate: 0.01 })
        );
    }
}
