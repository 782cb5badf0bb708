//! Core projection engine for year-by-year retirement income projections

use chrono::Utc;

use super::records::AnnualRecord;
use super::results::{AssumptionSet, RetirementResults, RunMetadata, CONFIG_VERSION, ENGINE_ID};
use super::state::ProjectionState;
use super::summary::{Summary, SummaryAggregator, SummaryInputs};
use super::tax::{TaxEngine, YearIncome};
use super::withdrawal::WithdrawalEngine;
use crate::assumptions::Assumptions;
use crate::benefits::{
    PensionEngine, PensionResult, SocialSecurityEngine, SocialSecurityResult, SupplementEngine,
    SupplementResult, FULL_BENEFIT_AGE,
};
use crate::error::{EngineError, EngineResult};
use crate::profile::{Profile, Regime};

/// FERS COLA is held below inflation: full COLA up to 2%, 2% between 2% and 3%,
/// inflation less one point above 3%
const FERS_COLA_FLOOR: f64 = 0.02;
const FERS_COLA_CEILING: f64 = 0.03;
const FERS_COLA_DIMINUTION: f64 = 0.01;

/// High-3 below this share of current salary is flagged
const LOW_HIGH3_RATIO: f64 = 0.9;

/// Everything computed once per scenario and read by every projected year
struct ScenarioBenefits<'a> {
    profile: &'a Profile,
    pension: PensionResult,
    social_security: SocialSecurityResult,
    supplement: SupplementResult,
    withdrawals: WithdrawalEngine<'a>,
    taxes: TaxEngine<'a>,
}

/// Main projection engine
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Run the full projection for one profile
    ///
    /// Benefits are computed once, then the pool and income are stepped from the
    /// retirement age through the horizon end age inclusive.
    pub fn project(&self, profile: &Profile) -> EngineResult<RetirementResults> {
        let retirement_age = profile.retirement_age()?;
        let end_age = self.assumptions.economic.horizon_end_age;
        if retirement_age > end_age {
            return Err(EngineError::HorizonExceeded {
                retirement_age,
                end_age,
            });
        }

        let scenario = ScenarioBenefits {
            profile,
            pension: PensionEngine::new(&self.assumptions.mra).calculate(profile, retirement_age),
            social_security: SocialSecurityEngine::new(&self.assumptions.social_security)
                .calculate(&profile.social_security)?,
            supplement: SupplementEngine::new(&self.assumptions.mra)
                .calculate(profile, retirement_age),
            withdrawals: WithdrawalEngine::new(
                &profile.pool,
                &self.assumptions.life_expectancy,
                self.assumptions.economic.default_withdrawal_rate,
                retirement_age,
            )?,
            taxes: TaxEngine::new(
                &self.assumptions.federal_tax,
                &self.assumptions.regional_tax,
                &profile.tax,
            ),
        };

        let annual_projections = self.project_years(&scenario, retirement_age);

        let summary = SummaryAggregator::summarize(
            &SummaryInputs {
                retirement_age,
                pension: &scenario.pension,
                social_security: &scenario.social_security,
                supplement: &scenario.supplement,
                pool_starting_balance: profile.pool.total(),
                reference_salary: profile.employment.current_salary,
            },
            &annual_projections,
        );

        let warnings = self.collect_warnings(profile, retirement_age, &scenario.pension, &summary);
        for warning in &warnings {
            log::warn!("{}: {}", profile.personal.name, warning);
        }

        log::info!(
            "Projected {} retiring at {}: {} years, lifetime net income {:.2}",
            profile.personal.name,
            retirement_age,
            annual_projections.len(),
            summary.lifetime_income
        );

        Ok(RetirementResults {
            summary,
            annual_projections,
            metadata: RunMetadata {
                calculation_date: Utc::now(),
                config_version: CONFIG_VERSION.to_string(),
                engine: ENGINE_ID.to_string(),
                assumptions: self.assumption_set(profile),
                warnings,
            },
        })
    }

    fn project_years(
        &self,
        scenario: &ScenarioBenefits<'_>,
        retirement_age: u32,
    ) -> Vec<AnnualRecord> {
        let end_age = self.assumptions.economic.horizon_end_age;
        let mut state =
            ProjectionState::at_retirement(retirement_age, scenario.profile.pool.total());
        let mut records = Vec::with_capacity((end_age - retirement_age + 1) as usize);

        while state.age <= end_age {
            let record = self.project_year(scenario, &state);
            state.advance_year(record.pool_end_balance);
            records.push(record);
        }

        records
    }

    /// Calculate one year: income, pool movement, taxes, deductions
    fn project_year(
        &self,
        scenario: &ScenarioBenefits<'_>,
        state: &ProjectionState,
    ) -> AnnualRecord {
        let profile = scenario.profile;
        let age = state.age;
        let mut record = AnnualRecord::new(profile.calendar_year_at(age), age, state.pool_balance);

        let (pension, cola_rate) = self.pension_income(
            profile.regime(),
            scenario.pension.final_annuity,
            state.retirement_age,
            age,
        );
        let income = YearIncome {
            pension,
            supplement: scenario.supplement.annual_amount_at(age),
            social_security: self.social_security_income(&scenario.social_security, age),
            withdrawal: scenario.withdrawals.withdrawal(state.pool_balance, age),
            other: 0.0,
        };
        record.set_income(&income);
        record.set_pool_movement(state.pool_balance * profile.pool.growth_rate);

        let taxes = scenario.taxes.calculate(&income, age);
        record.set_deductions(
            &taxes,
            self.health_premium(profile, state.years_retired()),
            self.assumptions.insurance.life_insurance_premium,
        );

        record.cola_rate = cola_rate;
        record.inflation_rate = self.assumptions.economic.inflation_rate;
        record
    }

    /// Annual pension at `age` and the COLA applied that year
    ///
    /// The first year is paid unadjusted. FERS pays the unadjusted annuity while
    /// the retiree is under 62; from 62 on, COLA compounds over all years retired.
    pub fn pension_income(
        &self,
        regime: Regime,
        annuity: f64,
        retirement_age: u32,
        age: u32,
    ) -> (f64, f64) {
        let years_retired = age.saturating_sub(retirement_age);
        if years_retired == 0 || (regime.is_fers() && age < FULL_BENEFIT_AGE) {
            return (annuity, 0.0);
        }

        let rate = Self::effective_cola_rate(regime, self.assumptions.economic.pension_cola_rate);
        (annuity * (1.0 + rate).powi(years_retired as i32), rate)
    }

    /// Regime-adjusted COLA for a nominal input rate
    pub fn effective_cola_rate(regime: Regime, nominal: f64) -> f64 {
        match regime {
            Regime::Csrs => nominal,
            Regime::Fers if nominal <= FERS_COLA_FLOOR => nominal,
            Regime::Fers if nominal <= FERS_COLA_CEILING => FERS_COLA_FLOOR,
            Regime::Fers => nominal - FERS_COLA_DIMINUTION,
        }
    }

    fn social_security_income(&self, benefit: &SocialSecurityResult, age: u32) -> f64 {
        if age < benefit.claiming_age {
            return 0.0;
        }
        let years_receiving = (age - benefit.claiming_age) as i32;
        let cola = self.assumptions.economic.social_security_cola;
        benefit.annual_benefit() * (1.0 + cola).powi(years_receiving)
    }

    /// Health premium for a year of retirement, grown from the first year
    pub fn health_premium(&self, profile: &Profile, years_retired: u32) -> f64 {
        let insurance = &self.assumptions.insurance;
        let (premium, growth) = match profile.health_insurance.retirement_premium {
            Some(premium) if premium > 0.0 => (premium, profile.health_insurance.premium_growth),
            _ => (insurance.default_health_premium, insurance.default_health_growth),
        };

        if growth > 0.0 {
            premium * (1.0 + growth).powi(years_retired as i32)
        } else {
            premium
        }
    }

    fn collect_warnings(
        &self,
        profile: &Profile,
        retirement_age: u32,
        pension: &PensionResult,
        summary: &Summary,
    ) -> Vec<String> {
        let mut warnings = Vec::new();
        let service = profile.service_years();

        let eligible = PensionEngine::new(&self.assumptions.mra).is_eligible(
            profile.regime(),
            retirement_age,
            service,
            profile.birth_year(),
        );
        if !eligible {
            warnings.push(format!(
                "Retirement eligibility requirements may not be met at age {} with {} years of service",
                retirement_age, service
            ));
        }

        if let Some(declared) = profile.pool.declared_total_mismatch() {
            warnings.push(format!(
                "Declared pool balance {:.2} does not match traditional + Roth total {:.2}",
                declared,
                profile.pool.total()
            ));
        }

        if profile.employment.high3_salary < profile.employment.current_salary * LOW_HIGH3_RATIO {
            warnings.push(
                "High-3 salary appears significantly lower than current salary".to_string(),
            );
        }

        if pension.reduction > 0.0 {
            warnings.push(format!(
                "Early retirement reduces the pension by {:.1}%",
                pension.reduction * 100.0
            ));
        }

        if let Some(age) = summary.pool_depletion_age {
            if age < self.assumptions.economic.horizon_end_age {
                warnings.push(format!("Investment pool is projected to run out at age {}", age));
            }
        }

        warnings
    }

    fn assumption_set(&self, profile: &Profile) -> AssumptionSet {
        let economic = &self.assumptions.economic;
        AssumptionSet {
            inflation_rate: economic.inflation_rate,
            pool_growth_rate: profile.pool.growth_rate,
            horizon_end_age: economic.horizon_end_age,
            pension_cola_rate: economic.pension_cola_rate,
            social_security_cola: economic.social_security_cola,
            tax_bracket_year: economic.tax_bracket_year,
        }
    }
}
