//! Retiree profile data structures and reference templates

mod data;
pub mod templates;

pub use data::{
    age_on, EmploymentInfo, HealthInsuranceInfo, PersonalInfo, PoolInfo, Profile, Regime,
    RetirementInfo, SocialSecurityInfo, SurvivorElection, TaxInfo, WithdrawalStrategy,
};
