//! Loop state for a single scenario

/// The only state carried between projection years
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Attained age for the current year
    pub age: u32,

    /// Start-of-year pool balance
    pub pool_balance: f64,

    /// Age at retirement (first projected year)
    pub retirement_age: u32,
}

impl ProjectionState {
    /// Initialize state at retirement
    pub fn at_retirement(retirement_age: u32, pool_balance: f64) -> Self {
        Self {
            age: retirement_age,
            pool_balance,
            retirement_age,
        }
    }

    pub fn years_retired(&self) -> u32 {
        self.age - self.retirement_age
    }

    /// Carry the end-of-year balance into the next year
    pub fn advance_year(&mut self, end_balance: f64) {
        self.pool_balance = end_balance;
        self.age += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_year() {
        let mut state = ProjectionState::at_retirement(62, 500_000.0);
        assert_eq!(state.years_retired(), 0);

        state.advance_year(515_000.0);

        assert_eq!(state.age, 63);
        assert_eq!(state.years_retired(), 1);
        assert_eq!(state.pool_balance, 515_000.0);
    }
}
