//! Scenario runner for retirement-age comparisons
//!
//! Holds one set of assumptions and fans a profile out over several retirement
//! ages. Each scenario works on its own clone of the profile, so scenarios run
//! in parallel and the caller's profile is never touched.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::{AssumptionLoadError, Assumptions};
use crate::error::{EngineError, EngineResult};
use crate::profile::Profile;
use crate::projection::{ProjectionEngine, RetirementResults, Summary};

/// Cross-scenario metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    pub scenario_count: usize,
    /// Index of the scenario with the highest lifetime income (first one on ties)
    pub best_scenario_index: Option<usize>,
    pub best_lifetime_income: Option<Summary>,
    /// Highest minus lowest lifetime income
    pub lifetime_income_spread: f64,
    /// Highest minus lowest replacement ratio
    pub replacement_ratio_spread: f64,
}

impl ComparisonMetrics {
    pub fn from_scenarios(scenarios: &[RetirementResults]) -> Self {
        let mut best: Option<(usize, f64)> = None;
        let mut income_range: Option<(f64, f64)> = None;
        let mut ratio_range: Option<(f64, f64)> = None;

        for (i, result) in scenarios.iter().enumerate() {
            let lifetime = result.summary.lifetime_income;
            let ratio = result.summary.replacement_ratio;

            // Strictly greater keeps the first maximum
            if best.map_or(true, |(_, top)| lifetime > top) {
                best = Some((i, lifetime));
            }
            income_range = Some(widen(income_range, lifetime));
            ratio_range = Some(widen(ratio_range, ratio));
        }

        let best_scenario_index = best.map(|(i, _)| i);
        Self {
            scenario_count: scenarios.len(),
            best_scenario_index,
            best_lifetime_income: best_scenario_index.map(|i| scenarios[i].summary.clone()),
            lifetime_income_spread: income_range.map_or(0.0, |(lo, hi)| hi - lo),
            replacement_ratio_spread: ratio_range.map_or(0.0, |(lo, hi)| hi - lo),
        }
    }
}

fn widen(range: Option<(f64, f64)>, value: f64) -> (f64, f64) {
    match range {
        Some((lo, hi)) => (lo.min(value), hi.max(value)),
        None => (value, value),
    }
}

/// Scenario results in input order plus cross-scenario metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub scenarios: Vec<RetirementResults>,
    pub metrics: ComparisonMetrics,
}

/// Pre-loaded runner for single and multi-scenario projections
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded base assumptions
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_federal(),
        }
    }

    /// Create runner by loading assumption tables from CSV files
    pub fn from_csv() -> Result<Self, AssumptionLoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &Path) -> Result<Self, AssumptionLoadError> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run a single projection at the profile's own retirement timing
    pub fn run(&self, profile: &Profile) -> EngineResult<RetirementResults> {
        ProjectionEngine::new(self.base_assumptions.clone()).project(profile)
    }

    /// Compare retirement ages given as text (e.g. from a command line)
    ///
    /// Every age is parsed before any scenario runs; one bad value fails the
    /// whole comparison.
    pub fn compare_retirement_ages<S: AsRef<str>>(
        &self,
        profile: &Profile,
        ages: &[S],
    ) -> EngineResult<ComparisonResult> {
        let parsed = ages
            .iter()
            .map(|value| {
                let value = value.as_ref();
                value
                    .trim()
                    .parse::<u32>()
                    .map_err(|source| EngineError::InvalidComparisonAge {
                        value: value.to_string(),
                        source,
                    })
            })
            .collect::<EngineResult<Vec<u32>>>()?;

        self.compare_ages(profile, &parsed)
    }

    /// Project the profile once per retirement age, in parallel
    ///
    /// Results come back in input order. If any scenario fails, the error of the
    /// first failing one in input order is returned and nothing is aggregated.
    pub fn compare_ages(&self, profile: &Profile, ages: &[u32]) -> EngineResult<ComparisonResult> {
        let engine = ProjectionEngine::new(self.base_assumptions.clone());

        let outcomes: Vec<EngineResult<RetirementResults>> = ages
            .par_iter()
            .map(|&age| engine.project(&profile.with_retirement_age(age)))
            .collect();

        let scenarios = outcomes.into_iter().collect::<EngineResult<Vec<_>>>()?;
        let metrics = ComparisonMetrics::from_scenarios(&scenarios);

        log::info!(
            "Compared {} retirement ages for {}: best index {:?}, lifetime spread {:.2}",
            metrics.scenario_count,
            profile.personal.name,
            metrics.best_scenario_index,
            metrics.lifetime_income_spread
        );

        Ok(ComparisonResult { scenarios, metrics })
    }

    /// Get reference to base assumptions for inspection
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
