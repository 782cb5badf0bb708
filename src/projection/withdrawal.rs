//! Investment pool drawdown
//!
//! The strategy tag and its parameters are checked once, when the engine is built.
//! A mismatch (a fixed-amount strategy with no amount, a rate on a lump sum, ...)
//! is rejected rather than silently producing zero withdrawals.

use crate::assumptions::LifeExpectancyTable;
use crate::error::{EngineError, EngineResult};
use crate::profile::{PoolInfo, WithdrawalStrategy};

/// Strategy with its validated parameters
#[derive(Debug, Clone, Copy, PartialEq)]
enum WithdrawalPlan {
    FixedAmount(f64),
    LifeExpectancy,
    Percentage(f64),
    LumpSum,
}

/// Yearly withdrawal calculator for one scenario
#[derive(Debug, Clone)]
pub struct WithdrawalEngine<'a> {
    plan: WithdrawalPlan,
    life_expectancy: &'a LifeExpectancyTable,
    retirement_age: u32,
}

impl<'a> WithdrawalEngine<'a> {
    /// Validate the pool's strategy against its parameters
    ///
    /// `default_rate` applies to the percentage strategy when the pool gives no rate.
    pub fn new(
        pool: &PoolInfo,
        life_expectancy: &'a LifeExpectancyTable,
        default_rate: f64,
        retirement_age: u32,
    ) -> EngineResult<Self> {
        let strategy = pool.strategy;
        let inconsistent = |detail: &str| EngineError::InconsistentWithdrawal {
            strategy,
            detail: detail.to_string(),
        };

        let plan = match (strategy, pool.withdrawal_amount, pool.withdrawal_rate) {
            (WithdrawalStrategy::FixedAmount, Some(amount), None) => {
                if amount < 0.0 {
                    return Err(inconsistent("withdrawal amount must not be negative"));
                }
                WithdrawalPlan::FixedAmount(amount)
            }
            (WithdrawalStrategy::FixedAmount, None, _) => {
                return Err(inconsistent("no withdrawal amount given"))
            }
            (WithdrawalStrategy::Percentage, None, rate) => {
                let rate = rate.unwrap_or(default_rate);
                if !(0.0..=1.0).contains(&rate) {
                    return Err(inconsistent("withdrawal rate must be between 0 and 1"));
                }
                WithdrawalPlan::Percentage(rate)
            }
            (WithdrawalStrategy::LifeExpectancy, None, None) => WithdrawalPlan::LifeExpectancy,
            (WithdrawalStrategy::LumpSum, None, None) => WithdrawalPlan::LumpSum,
            (WithdrawalStrategy::FixedAmount, Some(_), Some(_)) | (_, None, Some(_)) => {
                return Err(inconsistent("withdrawal rate given"))
            }
            (_, Some(_), _) => return Err(inconsistent("withdrawal amount given")),
        };

        Ok(Self {
            plan,
            life_expectancy,
            retirement_age,
        })
    }

    /// Withdrawal for the year the retiree is `age`, given the start-of-year balance
    pub fn withdrawal(&self, balance: f64, age: u32) -> f64 {
        if balance <= 0.0 {
            return 0.0;
        }

        match self.plan {
            WithdrawalPlan::FixedAmount(amount) => amount.min(balance),
            WithdrawalPlan::LifeExpectancy => balance / self.life_expectancy.divisor(age),
            WithdrawalPlan::Percentage(rate) => balance * rate,
            WithdrawalPlan::LumpSum if age == self.retirement_age => balance,
            WithdrawalPlan::LumpSum => 0.0,
        }
    }
}
