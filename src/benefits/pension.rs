//! Pension annuity calculations for FERS and CSRS
//!
//! Computes, once per scenario:
//! - the base annuity (FERS two-way multiplier, CSRS tiered percentages)
//! - the early-retirement reduction
//! - the survivor election cost
//!
//! Eligibility conditions are held as ordered rule tables so each regime's
//! age/service combinations can be read off directly.

use serde::{Deserialize, Serialize};

use crate::assumptions::MraTable;
use crate::profile::{Profile, Regime, SurvivorElection};

/// Age at which FERS pays an unreduced annuity, COLAs start and the supplement stops
pub const FULL_BENEFIT_AGE: u32 = 62;

/// FERS multiplier at 62+ with 20+ years
const FERS_ENHANCED_MULTIPLIER: f64 = 0.011;
const FERS_STANDARD_MULTIPLIER: f64 = 0.010;
const FERS_ENHANCED_MIN_SERVICE: f64 = 20.0;

/// FERS MRA+10 reduction per year under 62 (uncapped)
const FERS_REDUCTION_PER_YEAR: f64 = 0.05;

/// CSRS reduction per year under 62, capped
const CSRS_REDUCTION_PER_YEAR: f64 = 0.02;
const CSRS_REDUCTION_CAP: f64 = 0.25;

/// CSRS accrual tiers: (years in tier, rate). The last tier takes all remaining service.
const CSRS_TIERS: [(f64, f64); 3] = [(5.0, 0.015), (5.0, 0.0175), (f64::INFINITY, 0.02)];

const FERS_FULL_SURVIVOR_RATE: f64 = 0.10;
const FERS_PARTIAL_SURVIVOR_RATE: f64 = 0.05;

/// CSRS full survivor cost: 2.5% of the first $3,600 plus 10% of the remainder
const CSRS_SURVIVOR_THRESHOLD: f64 = 3_600.0;
const CSRS_SURVIVOR_LOW_RATE: f64 = 0.025;
const CSRS_SURVIVOR_HIGH_RATE: f64 = 0.10;

/// Minimum age in an age/service rule
#[derive(Debug, Clone, Copy)]
enum AgeFloor {
    Fixed(u32),
    Mra,
}

/// "At least this age with at least this much service"
#[derive(Debug, Clone, Copy)]
struct ServiceRule {
    age: AgeFloor,
    service: f64,
}

const fn rule(age: AgeFloor, service: f64) -> ServiceRule {
    ServiceRule { age, service }
}

const FERS_UNREDUCED: [ServiceRule; 3] = [
    rule(AgeFloor::Fixed(62), 5.0),
    rule(AgeFloor::Fixed(60), 20.0),
    rule(AgeFloor::Mra, 30.0),
];
const FERS_MRA_PLUS_10: ServiceRule = rule(AgeFloor::Mra, 10.0);

const CSRS_UNREDUCED: [ServiceRule; 3] = [
    rule(AgeFloor::Fixed(62), 0.0),
    rule(AgeFloor::Fixed(60), 20.0),
    rule(AgeFloor::Fixed(55), 30.0),
];
const CSRS_EARLY: ServiceRule = rule(AgeFloor::Fixed(55), 20.0);

const CSRS_ELIGIBLE: [ServiceRule; 3] = [
    rule(AgeFloor::Fixed(62), 5.0),
    rule(AgeFloor::Fixed(60), 20.0),
    rule(AgeFloor::Fixed(55), 30.0),
];

/// Result of the pension calculation for one scenario (annual amounts)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PensionResult {
    pub base: f64,
    /// Early-retirement reduction as a fraction (0.25 = 25%)
    pub reduction: f64,
    pub post_reduction: f64,
    pub survivor_cost: f64,
    pub final_annuity: f64,
}

/// Pension calculator bound to an MRA table
pub struct PensionEngine<'a> {
    mra_table: &'a MraTable,
}

impl<'a> PensionEngine<'a> {
    pub fn new(mra_table: &'a MraTable) -> Self {
        Self { mra_table }
    }

    /// Full pension calculation for a profile retiring at `retirement_age`
    pub fn calculate(&self, profile: &Profile, retirement_age: u32) -> PensionResult {
        let regime = profile.regime();
        let service = profile.service_years();
        let mra = self.minimum_retirement_age(profile.birth_year());

        let base = Self::base_annuity(
            regime,
            service,
            profile.employment.high3_salary,
            retirement_age,
        );
        let reduction = match regime {
            Regime::Fers => Self::fers_reduction(retirement_age, service, mra),
            Regime::Csrs => Self::csrs_reduction(retirement_age, service),
        };

        let post_reduction = base * (1.0 - reduction);
        let survivor_cost =
            Self::survivor_cost(regime, profile.retirement.survivor_election, post_reduction);

        let result = PensionResult {
            base,
            reduction,
            post_reduction,
            survivor_cost,
            final_annuity: post_reduction - survivor_cost,
        };
        log::debug!(
            "{:?} pension at age {} with {:.2} years: base {:.2}, reduction {:.1}%, final {:.2}",
            regime,
            retirement_age,
            service,
            base,
            reduction * 100.0,
            result.final_annuity
        );
        result
    }

    /// MRA for a birth year
    pub fn minimum_retirement_age(&self, birth_year: i32) -> u32 {
        self.mra_table.lookup(birth_year)
    }

    /// Unreduced annual annuity before any reduction or survivor election
    pub fn base_annuity(regime: Regime, service: f64, high3: f64, age: u32) -> f64 {
        match regime {
            Regime::Fers => {
                // Two-way break, never interpolated
                let enhanced = age >= FULL_BENEFIT_AGE && service >= FERS_ENHANCED_MIN_SERVICE;
                let multiplier = if enhanced {
                    FERS_ENHANCED_MULTIPLIER
                } else {
                    FERS_STANDARD_MULTIPLIER
                };
                high3 * service * multiplier
            }
            Regime::Csrs => {
                let mut remaining = service.max(0.0);
                let mut annuity = 0.0;
                for (tier_years, rate) in CSRS_TIERS {
                    if remaining <= 0.0 {
                        break;
                    }
                    let in_tier = remaining.min(tier_years);
                    annuity += in_tier * rate * high3;
                    remaining -= in_tier;
                }
                annuity
            }
        }
    }

    /// FERS reduction: zero under any unreduced rule, else 5% per year under 62
    /// for MRA+10 retirements. Deliberately uncapped: retiring at 55 costs 35%.
    pub fn fers_reduction(age: u32, service: f64, mra: u32) -> f64 {
        if FERS_UNREDUCED.iter().any(|r| r.satisfied(age, service, mra)) {
            return 0.0;
        }
        if FERS_MRA_PLUS_10.satisfied(age, service, mra) && age < FULL_BENEFIT_AGE {
            return FERS_REDUCTION_PER_YEAR * (FULL_BENEFIT_AGE - age) as f64;
        }
        0.0
    }

    /// CSRS reduction: zero under any unreduced rule, else 2% per year under 62, capped at 25%
    pub fn csrs_reduction(age: u32, service: f64) -> f64 {
        // CSRS rules never reference the MRA
        let mra = 0;
        if CSRS_UNREDUCED.iter().any(|r| r.satisfied(age, service, mra)) {
            return 0.0;
        }
        if CSRS_EARLY.satisfied(age, service, mra) {
            let years_under = FULL_BENEFIT_AGE.saturating_sub(age) as f64;
            return (CSRS_REDUCTION_PER_YEAR * years_under).min(CSRS_REDUCTION_CAP);
        }
        0.0
    }

    /// Annual cost of the survivor election, taken from the post-reduction annuity
    pub fn survivor_cost(regime: Regime, election: SurvivorElection, post_reduction: f64) -> f64 {
        match (regime, election) {
            (_, SurvivorElection::None) => 0.0,
            (Regime::Fers, SurvivorElection::Full) => post_reduction * FERS_FULL_SURVIVOR_RATE,
            (Regime::Fers, SurvivorElection::Partial) => {
                post_reduction * FERS_PARTIAL_SURVIVOR_RATE
            }
            (Regime::Csrs, SurvivorElection::Full) => csrs_full_survivor_cost(post_reduction),
            (Regime::Csrs, SurvivorElection::Partial) => {
                csrs_full_survivor_cost(post_reduction) * 0.5
            }
        }
    }

    /// Whether the age/service combination meets any basic retirement eligibility rule
    pub fn is_eligible(&self, regime: Regime, age: u32, service: f64, birth_year: i32) -> bool {
        match regime {
            Regime::Fers => {
                let mra = self.minimum_retirement_age(birth_year);
                FERS_UNREDUCED
                    .iter()
                    .chain(std::iter::once(&FERS_MRA_PLUS_10))
                    .any(|r| r.satisfied(age, service, mra))
            }
            Regime::Csrs => CSRS_ELIGIBLE.iter().any(|r| r.satisfied(age, service, 0)),
        }
    }
}

impl ServiceRule {
    fn satisfied(&self, age: u32, service: f64, mra: u32) -> bool {
        let min_age = match self.age {
            AgeFloor::Fixed(a) => a,
            AgeFloor::Mra => mra,
        };
        age >= min_age && service >= self.service
    }
}

fn csrs_full_survivor_cost(annuity: f64) -> f64 {
    let low = annuity.min(CSRS_SURVIVOR_THRESHOLD);
    let high = (annuity - CSRS_SURVIVOR_THRESHOLD).max(0.0);
    low * CSRS_SURVIVOR_LOW_RATE + high * CSRS_SURVIVOR_HIGH_RATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::templates;
    use approx::assert_relative_eq;

    #[test]
    fn test_fers_enhanced_multiplier() {
        let base = PensionEngine::base_annuity(Regime::Fers, 25.0, 82_000.0, 62);
        assert_eq!(base, 82_000.0 * 25.0 * 0.011);
        assert_relative_eq!(base, 22_550.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fers_standard_multiplier_not_interpolated() {
        // Fractional service under 20 years at 62
        let base = PensionEngine::base_annuity(Regime::Fers, 19.5, 80_000.0, 62);
        assert_eq!(base, 80_000.0 * 19.5 * 0.010);

        // 20+ years but under 62
        let base = PensionEngine::base_annuity(Regime::Fers, 30.0, 80_000.0, 61);
        assert_eq!(base, 80_000.0 * 30.0 * 0.010);
    }

    #[test]
    fn test_csrs_tiers() {
        let high3 = 102_000.0;
        let base = PensionEngine::base_annuity(Regime::Csrs, 42.0, high3, 66);
        let expected = (5.0 * 0.015 + 5.0 * 0.0175 + 32.0 * 0.02) * high3;
        assert_relative_eq!(base, expected, max_relative = 1e-12);
        assert_relative_eq!(base, 81_855.0, max_relative = 1e-12);
    }

    #[test]
    fn test_csrs_partial_tiers() {
        let high3 = 60_000.0;
        assert_relative_eq!(
            PensionEngine::base_annuity(Regime::Csrs, 3.0, high3, 62),
            3.0 * 0.015 * high3,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            PensionEngine::base_annuity(Regime::Csrs, 7.5, high3, 62),
            (5.0 * 0.015 + 2.5 * 0.0175) * high3,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_csrs_strictly_increasing_in_service() {
        let mut previous = 0.0;
        for tenths in 1..=450 {
            let service = tenths as f64 / 10.0;
            let base = PensionEngine::base_annuity(Regime::Csrs, service, 75_000.0, 62);
            assert!(base > previous, "not increasing at {} years", service);
            previous = base;
        }
    }

    #[test]
    fn test_fers_reduction_rules() {
        // Unreduced combinations
        assert_eq!(PensionEngine::fers_reduction(62, 5.0, 57), 0.0);
        assert_eq!(PensionEngine::fers_reduction(60, 20.0, 57), 0.0);
        assert_eq!(PensionEngine::fers_reduction(57, 30.0, 57), 0.0);

        // MRA+10: 5% per year under 62
        assert_relative_eq!(PensionEngine::fers_reduction(57, 15.0, 57), 0.25, epsilon = 1e-12);
        assert_relative_eq!(PensionEngine::fers_reduction(60, 15.0, 57), 0.10, epsilon = 1e-12);

        // Linear and uncapped for larger gaps
        assert_relative_eq!(PensionEngine::fers_reduction(55, 12.0, 55), 0.35, epsilon = 1e-12);

        // Not eligible at all: no formula applies
        assert_eq!(PensionEngine::fers_reduction(56, 15.0, 57), 0.0);
    }

    #[test]
    fn test_csrs_reduction_rules() {
        assert_eq!(PensionEngine::csrs_reduction(62, 3.0), 0.0);
        assert_eq!(PensionEngine::csrs_reduction(60, 20.0), 0.0);
        assert_eq!(PensionEngine::csrs_reduction(55, 30.0), 0.0);

        assert_relative_eq!(PensionEngine::csrs_reduction(58, 25.0), 0.08, epsilon = 1e-12);
        assert_relative_eq!(PensionEngine::csrs_reduction(55, 20.0), 0.14, epsilon = 1e-12);
        // Below the floor age nothing applies
        assert_eq!(PensionEngine::csrs_reduction(50, 25.0), 0.0);
    }

    #[test]
    fn test_csrs_reduction_within_cap() {
        for age in 40..70 {
            for service in [5.0, 20.0, 25.0, 29.9] {
                let reduction = PensionEngine::csrs_reduction(age, service);
                assert!((0.0..=CSRS_REDUCTION_CAP).contains(&reduction));
            }
        }
    }

    #[test]
    fn test_fers_survivor_costs() {
        let post = 20_000.0;
        let full = PensionEngine::survivor_cost(Regime::Fers, SurvivorElection::Full, post);
        let partial = PensionEngine::survivor_cost(Regime::Fers, SurvivorElection::Partial, post);

        assert_eq!(full, post * 0.10);
        assert_eq!(partial, post * 0.05);
        assert_eq!(PensionEngine::survivor_cost(Regime::Fers, SurvivorElection::None, post), 0.0);
    }

    #[test]
    fn test_csrs_survivor_costs() {
        let full = PensionEngine::survivor_cost(Regime::Csrs, SurvivorElection::Full, 50_000.0);
        assert_relative_eq!(full, 3_600.0 * 0.025 + 46_400.0 * 0.10, epsilon = 1e-9);

        let partial =
            PensionEngine::survivor_cost(Regime::Csrs, SurvivorElection::Partial, 50_000.0);
        assert_eq!(partial, full * 0.5);

        // Below the threshold only the low rate applies
        let small = PensionEngine::survivor_cost(Regime::Csrs, SurvivorElection::Full, 3_000.0);
        assert_relative_eq!(small, 75.0, epsilon = 1e-9);
    }

    #[test]
    fn test_end_to_end_fers_full_survivor() {
        let profile = templates::basic_fers();
        let mra = MraTable::default();
        let result = PensionEngine::new(&mra).calculate(&profile, 62);

        assert_relative_eq!(result.base, 22_550.0, epsilon = 1e-6);
        assert_eq!(result.reduction, 0.0);
        assert_relative_eq!(result.survivor_cost, 2_255.0, epsilon = 1e-6);
        assert_relative_eq!(result.final_annuity, 20_295.0, epsilon = 1e-6);
        assert_eq!(result.survivor_cost, result.post_reduction * 0.10);
    }

    #[test]
    fn test_early_fers_retirement_reduces_annuity() {
        let mut profile = templates::basic_fers();
        profile.employment.creditable_service_years = 15.0;
        let mra = MraTable::default();
        let result = PensionEngine::new(&mra).calculate(&profile, 57);

        assert_relative_eq!(result.reduction, 0.25, epsilon = 1e-12);
        assert_relative_eq!(result.post_reduction, result.base * 0.75, max_relative = 1e-12);
        assert_relative_eq!(
            result.final_annuity,
            result.post_reduction - result.survivor_cost,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_eligibility() {
        let mra = MraTable::default();
        let engine = PensionEngine::new(&mra);

        assert!(engine.is_eligible(Regime::Fers, 62, 5.0, 1967));
        assert!(engine.is_eligible(Regime::Fers, 57, 10.0, 1967));
        assert!(!engine.is_eligible(Regime::Fers, 56, 30.0, 1967));
        assert!(!engine.is_eligible(Regime::Fers, 61, 8.0, 1967));

        assert!(engine.is_eligible(Regime::Csrs, 55, 30.0, 1960));
        assert!(!engine.is_eligible(Regime::Csrs, 58, 25.0, 1960));
    }
}
