//! FERS annuity supplement
//!
//! Bridges the gap until Social Security for FERS retirees leaving before 62
//! under an immediate unreduced retirement (MRA+30 or 60+20). Approximated as
//! the full Social Security benefit prorated over a 40-year career.

use serde::{Deserialize, Serialize};

use super::pension::FULL_BENEFIT_AGE;
use crate::assumptions::MraTable;
use crate::profile::Profile;

/// Career length the full Social Security benefit is prorated over
const CAREER_YEARS: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplementResult {
    pub eligible: bool,
    pub monthly_amount: f64,
    /// First age paid (inclusive)
    pub start_age: u32,
    /// Age payments stop (exclusive)
    pub end_age: u32,
    pub service_years: f64,
    /// Monthly full Social Security benefit the amount is prorated from
    pub ss_estimate: f64,
}

impl SupplementResult {
    pub fn ineligible() -> Self {
        Self {
            eligible: false,
            monthly_amount: 0.0,
            start_age: 0,
            end_age: 0,
            service_years: 0.0,
            ss_estimate: 0.0,
        }
    }

    pub fn pays_at(&self, age: u32) -> bool {
        self.eligible && age >= self.start_age && age < self.end_age
    }

    /// Supplement income for the year the retiree is `age`
    pub fn annual_amount_at(&self, age: u32) -> f64 {
        if self.pays_at(age) {
            self.monthly_amount * 12.0
        } else {
            0.0
        }
    }
}

pub struct SupplementEngine<'a> {
    mra_table: &'a MraTable,
}

impl<'a> SupplementEngine<'a> {
    pub fn new(mra_table: &'a MraTable) -> Self {
        Self { mra_table }
    }

    pub fn calculate(&self, profile: &Profile, retirement_age: u32) -> SupplementResult {
        if !profile.regime().is_fers() || retirement_age >= FULL_BENEFIT_AGE {
            return SupplementResult::ineligible();
        }

        let service = profile.service_years();
        let mra = self.mra_table.lookup(profile.birth_year());
        let eligible = (retirement_age >= mra && service >= 30.0)
            || (retirement_age >= 60 && service >= 20.0);
        if !eligible {
            return SupplementResult::ineligible();
        }

        let ss_estimate = profile.social_security.full_benefit;
        let monthly_amount = ss_estimate / CAREER_YEARS * service;
        log::debug!(
            "FERS supplement {:.2}/month from {} to {}",
            monthly_amount,
            retirement_age,
            FULL_BENEFIT_AGE
        );

        SupplementResult {
            eligible: true,
            monthly_amount,
            start_age: retirement_age,
            end_age: FULL_BENEFIT_AGE,
            service_years: service,
            ss_estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{templates, Regime};
    use approx::assert_relative_eq;

    #[test]
    fn test_mra_plus_30_supplement() {
        let mut profile = templates::basic_fers();
        profile.employment.creditable_service_years = 30.0;
        let mra = MraTable::default();

        let result = SupplementEngine::new(&mra).calculate(&profile, 57);

        assert!(result.eligible);
        assert_relative_eq!(result.monthly_amount, 2_800.0 / 40.0 * 30.0, epsilon = 1e-9);
        assert_eq!((result.start_age, result.end_age), (57, 62));
    }

    #[test]
    fn test_window_is_half_open() {
        let mut profile = templates::basic_fers();
        profile.employment.creditable_service_years = 20.0;
        let mra = MraTable::default();

        let result = SupplementEngine::new(&mra).calculate(&profile, 60);

        assert_eq!(result.annual_amount_at(59), 0.0);
        assert_relative_eq!(
            result.annual_amount_at(60),
            2_800.0 / 40.0 * 20.0 * 12.0,
            epsilon = 1e-9
        );
        assert!(result.pays_at(61));
        assert_eq!(result.annual_amount_at(62), 0.0);
    }

    #[test]
    fn test_not_paid_at_or_after_62() {
        let profile = templates::basic_fers();
        let mra = MraTable::default();

        assert!(!SupplementEngine::new(&mra).calculate(&profile, 62).eligible);
    }

    #[test]
    fn test_mra_plus_10_gets_no_supplement() {
        let mut profile = templates::basic_fers();
        profile.employment.creditable_service_years = 15.0;
        let mra = MraTable::default();

        assert_eq!(
            SupplementEngine::new(&mra).calculate(&profile, 57),
            SupplementResult::ineligible()
        );
    }

    #[test]
    fn test_csrs_never_eligible() {
        let mut profile = templates::basic_fers();
        profile.personal.regime = Regime::Csrs;
        profile.employment.creditable_service_years = 35.0;
        let mra = MraTable::default();

        assert!(!SupplementEngine::new(&mra).calculate(&profile, 57).eligible);
    }
}
