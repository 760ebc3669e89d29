//! Scenario runner for batch projections and simulations
//!
//! Holds one engine configuration and fans independent runs out over the
//! rayon thread pool. Every run is a pure function of its inputs, so batch
//! results come back in input order and match the sequential results.

use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::investment::{InvestmentRun, InvestmentScenario};
use crate::profile::Profile;
use crate::projection::{ProjectionConfig, ProjectionResult, WealthProjector};

/// Pre-configured runner for batch work
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let sweep = runner.run_hike_sweep(&profile, opening, &[5.0, 10.0, 15.0])?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: EngineConfig,
}

impl ScenarioRunner {
    /// Create runner with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a single projection with the configured horizon and raise
    pub fn run_projection(&self, profile: &Profile, opening_balance: f64) -> Result<ProjectionResult> {
        WealthProjector::new(self.config.projection.clone()).project_from(profile, opening_balance)
    }

    /// One projection per raise rate, computed in parallel
    pub fn run_hike_sweep(
        &self,
        profile: &Profile,
        opening_balance: f64,
        hikes: &[f64],
    ) -> Result<Vec<ProjectionResult>> {
        log::info!("running hike sweep over {} rates", hikes.len());
        hikes
            .par_iter()
            .map(|&hike| {
                let config = ProjectionConfig {
                    annual_hike_percent: hike,
                    ..self.config.projection.clone()
                };
                WealthProjector::new(config).project_from(profile, opening_balance)
            })
            .collect()
    }

    /// Simulate the configured default investment plan
    pub fn run_investment(&self) -> Result<InvestmentRun> {
        self.config.investment.simulate()
    }

    /// Simulate many plans in parallel
    pub fn run_investments(&self, scenarios: &[InvestmentScenario]) -> Result<Vec<InvestmentRun>> {
        log::info!("simulating {} investment scenarios", scenarios.len());
        let runs = scenarios
            .par_iter()
            .map(InvestmentScenario::simulate)
            .collect::<Result<Vec<_>>>()?;
        log::debug!("investment batch finished");
        Ok(runs)
    }
}
