//! Benefit calculations computed once per scenario: pension annuity,
//! Social Security at the claiming age, and the FERS supplement

mod pension;
mod social_security;
mod supplement;

pub use pension::{PensionEngine, PensionResult, FULL_BENEFIT_AGE};
pub use social_security::{SocialSecurityEngine, SocialSecurityResult};
pub use supplement::{SupplementEngine, SupplementResult};
