//! Reference profiles
//!
//! Fully populated profiles for a typical FERS and CSRS retiree. Callers use them as
//! starting points; the test suites use them as fixtures.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::data::*;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid template date")
}

/// FERS employee born 1967, 25 years of service, retiring at 62 with full survivor election
pub fn basic_fers() -> Profile {
    Profile {
        personal: PersonalInfo {
            name: "John Doe".to_string(),
            birth_date: date(1967, 3, 15),
            regime: Regime::Fers,
        },
        employment: EmploymentInfo {
            current_salary: 85_000.0,
            high3_salary: 82_000.0,
            creditable_service_years: 25.0,
        },
        retirement: RetirementInfo {
            target_age: 62,
            target_date: None,
            survivor_election: SurvivorElection::Full,
        },
        pool: PoolInfo {
            traditional_balance: 400_000.0,
            roth_balance: 100_000.0,
            current_balance: None,
            strategy: WithdrawalStrategy::Percentage,
            withdrawal_amount: None,
            withdrawal_rate: Some(0.04),
            growth_rate: 0.07,
        },
        social_security: SocialSecurityInfo {
            full_benefit: 2_800.0,
            claiming_age: 67,
            point_estimates: BTreeMap::from([(62, 2_240.0), (67, 2_800.0), (70, 3_472.0)]),
        },
        health_insurance: HealthInsuranceInfo {
            retirement_premium: Some(4_800.0),
            premium_growth: 0.03,
        },
        tax: TaxInfo {
            jurisdiction: Some("VA".to_string()),
            regional_rate: Some(0.05),
            pension_exempt: false,
            social_security_exempt: false,
        },
    }
}

/// CSRS employee born 1958 with 42 years of service, retiring at 66
pub fn csrs() -> Profile {
    Profile {
        personal: PersonalInfo {
            name: "Robert Johnson".to_string(),
            birth_date: date(1958, 11, 3),
            regime: Regime::Csrs,
        },
        employment: EmploymentInfo {
            current_salary: 102_000.0,
            high3_salary: 102_000.0,
            creditable_service_years: 42.0,
        },
        retirement: RetirementInfo {
            target_age: 66,
            target_date: Some(date(2024, 11, 3)),
            survivor_election: SurvivorElection::Full,
        },
        pool: PoolInfo {
            traditional_balance: 250_000.0,
            roth_balance: 50_000.0,
            current_balance: Some(300_000.0),
            strategy: WithdrawalStrategy::LifeExpectancy,
            withdrawal_amount: None,
            withdrawal_rate: None,
            growth_rate: 0.06,
        },
        social_security: SocialSecurityInfo {
            full_benefit: 1_800.0,
            claiming_age: 67,
            point_estimates: BTreeMap::from([(62, 1_440.0), (67, 1_800.0), (70, 2_232.0)]),
        },
        health_insurance: HealthInsuranceInfo {
            retirement_premium: Some(5_200.0),
            premium_growth: 0.03,
        },
        tax: TaxInfo {
            jurisdiction: Some("MD".to_string()),
            regional_rate: Some(0.04),
            pension_exempt: true,
            social_security_exempt: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_dates() {
        let fers = basic_fers();
        assert_eq!(fers.personal.birth_date, NaiveDate::from_ymd_opt(1967, 3, 15).unwrap());
        assert_eq!(fers.birth_year(), 1967);

        let csrs = csrs();
        assert_eq!(csrs.personal.birth_date, NaiveDate::from_ymd_opt(1958, 11, 3).unwrap());
        assert_eq!(
            csrs.retirement.target_date,
            Some(NaiveDate::from_ymd_opt(2024, 11, 3).unwrap())
        );
        assert_eq!(csrs.retirement_age().unwrap(), 66);
    }
}
