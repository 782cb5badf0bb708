//! Social Security claiming-age adjustment
//!
//! Early claiming reduces the full benefit by 5/9 of 1% per month for the first
//! 36 months and 5/12 of 1% per month beyond; delayed claiming adds 2/3 of 1% per
//! month up to 70. A point estimate for the claiming age, when supplied, wins over
//! the formula.

use serde::{Deserialize, Serialize};

use crate::assumptions::SocialSecurityRules;
use crate::error::{EngineError, EngineResult};
use crate::profile::SocialSecurityInfo;

const EARLY_FIRST_TIER_PER_MONTH: f64 = 5.0 / 900.0;
const EARLY_SECOND_TIER_PER_MONTH: f64 = 5.0 / 1200.0;
const DELAYED_CREDIT_PER_MONTH: f64 = 2.0 / 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocialSecurityResult {
    pub claiming_age: u32,
    /// Monthly benefit at full retirement age
    pub full_benefit: f64,
    pub adjustment_factor: f64,
    /// Monthly benefit at the claiming age, before any COLA
    pub monthly_benefit: f64,
    /// True when the amount came from a supplied estimate rather than the formula
    pub from_point_estimate: bool,
}

impl SocialSecurityResult {
    pub fn annual_benefit(&self) -> f64 {
        self.monthly_benefit * 12.0
    }
}

pub struct SocialSecurityEngine<'a> {
    rules: &'a SocialSecurityRules,
}

impl<'a> SocialSecurityEngine<'a> {
    pub fn new(rules: &'a SocialSecurityRules) -> Self {
        Self { rules }
    }

    pub fn calculate(&self, info: &SocialSecurityInfo) -> EngineResult<SocialSecurityResult> {
        let age = info.claiming_age;
        if age < self.rules.earliest_claiming_age || age > self.rules.latest_claiming_age {
            return Err(EngineError::ClaimingAgeOutOfRange {
                age,
                min: self.rules.earliest_claiming_age,
                max: self.rules.latest_claiming_age,
            });
        }

        let result = match info.point_estimates.get(&age) {
            Some(&estimate) => SocialSecurityResult {
                claiming_age: age,
                full_benefit: info.full_benefit,
                adjustment_factor: if info.full_benefit > 0.0 {
                    estimate / info.full_benefit
                } else {
                    0.0
                },
                monthly_benefit: estimate,
                from_point_estimate: true,
            },
            None => {
                let factor = self.adjustment_factor(age);
                SocialSecurityResult {
                    claiming_age: age,
                    full_benefit: info.full_benefit,
                    adjustment_factor: factor,
                    monthly_benefit: info.full_benefit * factor,
                    from_point_estimate: false,
                }
            }
        };

        log::debug!(
            "Social Security at {}: factor {:.4}, monthly {:.2}{}",
            age,
            result.adjustment_factor,
            result.monthly_benefit,
            if result.from_point_estimate { " (estimate)" } else { "" }
        );
        Ok(result)
    }

    /// Multiplier applied to the full benefit for claiming at `age`
    pub fn adjustment_factor(&self, age: u32) -> f64 {
        let fra = self.rules.full_retirement_age;

        if age < fra {
            let months_early = (fra - age) * 12;
            let first = months_early.min(self.rules.first_tier_months) as f64;
            let second = months_early.saturating_sub(self.rules.first_tier_months) as f64;
            1.0 - first * EARLY_FIRST_TIER_PER_MONTH - second * EARLY_SECOND_TIER_PER_MONTH
        } else if age > fra {
            let months_late = (age - fra) * 12;
            1.0 + months_late as f64 * DELAYED_CREDIT_PER_MONTH
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn info(full_benefit: f64, claiming_age: u32) -> SocialSecurityInfo {
        SocialSecurityInfo {
            full_benefit,
            claiming_age,
            point_estimates: BTreeMap::new(),
        }
    }

    #[test]
    fn test_factor_at_full_retirement_age_is_exact() {
        let rules = SocialSecurityRules::default();
        let engine = SocialSecurityEngine::new(&rules);

        assert_eq!(engine.adjustment_factor(67), 1.0);
    }

    #[test]
    fn test_factor_at_62_and_70() {
        let rules = SocialSecurityRules::default();
        let engine = SocialSecurityEngine::new(&rules);

        // 36 months at 5/9% plus 24 months at 5/12%
        assert_relative_eq!(engine.adjustment_factor(62), 0.70, epsilon = 1e-12);
        // 36 months at 2/3%
        assert_relative_eq!(engine.adjustment_factor(70), 1.24, epsilon = 1e-12);
        // 24 months early stays in the first tier
        assert_relative_eq!(
            engine.adjustment_factor(65),
            1.0 - 24.0 * 5.0 / 900.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_factor_monotone_in_claiming_age() {
        let rules = SocialSecurityRules::default();
        let engine = SocialSecurityEngine::new(&rules);

        for age in 62..67 {
            assert!(engine.adjustment_factor(age) < 1.0);
        }
        for age in 68..=70 {
            assert!(engine.adjustment_factor(age) > 1.0);
        }
        for age in 62..70 {
            assert!(engine.adjustment_factor(age + 1) > engine.adjustment_factor(age));
        }
    }

    #[test]
    fn test_point_estimate_wins() {
        let rules = SocialSecurityRules::default();
        let engine = SocialSecurityEngine::new(&rules);
        let mut info = info(2_800.0, 62);
        info.point_estimates.insert(62, 2_240.0);

        let result = engine.calculate(&info).unwrap();

        assert!(result.from_point_estimate);
        assert_eq!(result.monthly_benefit, 2_240.0);
        assert_relative_eq!(result.adjustment_factor, 0.8, epsilon = 1e-12);
        assert_relative_eq!(result.annual_benefit(), 26_880.0, epsilon = 1e-9);
    }

    #[test]
    fn test_point_estimate_with_zero_full_benefit() {
        let rules = SocialSecurityRules::default();
        let engine = SocialSecurityEngine::new(&rules);
        let mut info = info(0.0, 67);
        info.point_estimates.insert(67, 1_000.0);

        let result = engine.calculate(&info).unwrap();

        assert_eq!(result.adjustment_factor, 0.0);
        assert_eq!(result.monthly_benefit, 1_000.0);
    }

    #[test]
    fn test_formula_without_estimate() {
        let rules = SocialSecurityRules::default();
        let engine = SocialSecurityEngine::new(&rules);

        let result = engine.calculate(&info(2_000.0, 70)).unwrap();

        assert!(!result.from_point_estimate);
        assert_relative_eq!(result.monthly_benefit, 2_480.0, epsilon = 1e-9);
    }

    #[test]
    fn test_claiming_age_out_of_range() {
        let rules = SocialSecurityRules::default();
        let engine = SocialSecurityEngine::new(&rules);

        assert!(matches!(
            engine.calculate(&info(2_000.0, 61)),
            Err(EngineError::ClaimingAgeOutOfRange { age: 61, .. })
        ));
        assert!(engine.calculate(&info(2_000.0, 71)).is_err());
    }
}
