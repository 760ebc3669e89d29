//! Month-by-month wealth projection with income steps and annual raises

use serde::{Deserialize, Serialize};

use super::snapshots::{ProjectionResult, ProjectionSnapshot};
use super::state::ProjectionState;
use crate::error::{ensure_finite, Result};
use crate::profile::Profile;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Number of months to project past the starting month
    pub months: u32,

    /// Raise applied to income every 12 months, in percent
    pub annual_hike_percent: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            months: 120, // 10 years
            annual_hike_percent: 10.0,
        }
    }
}

impl ProjectionConfig {
    pub fn with_hike(annual_hike_percent: f64) -> Self {
        Self {
            annual_hike_percent,
            ..Self::default()
        }
    }
}

/// Wealth projection engine
#[derive(Debug, Clone, Default)]
pub struct WealthProjector {
    config: ProjectionConfig,
}

impl WealthProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project starting from the profile's base balance
    pub fn project(&self, profile: &Profile) -> Result<ProjectionResult> {
        self.project_from(profile, profile.base_balance)
    }

    /// Project starting from an explicit opening balance, usually the
    /// ledger's current balance
    pub fn project_from(&self, profile: &Profile, opening_balance: f64) -> Result<ProjectionResult> {
        profile.validate()?;
        let opening_balance = ensure_finite("opening_balance", opening_balance)?;
        let hike = ensure_finite("annual_hike_percent", self.config.annual_hike_percent)?;

        let mut state = ProjectionState::from_profile(profile, opening_balance);
        let mut result = ProjectionResult::new(hike);

        for month in 0..=self.config.months {
            state.month = month;

            // Income step lands before that month's raise
            if let Some(income) = profile.future_income.fires_at(month) {
                state.income = income;
            }
            if month > 0 && state.is_year_boundary() {
                state.income *= 1.0 + hike / 100.0;
            }

            state.accumulate();

            if state.is_year_boundary() {
                result.add_snapshot(ProjectionSnapshot::from_state(&state));
            }
        }

        Ok(result)
    }
}

/// Run one projection with the given config
pub fn project(profile: &Profile, config: &ProjectionConfig) -> Result<ProjectionResult> {
    WealthProjector::new(config.clone()).project(profile)
}
