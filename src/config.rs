//! Engine configuration loaded from JSON
//!
//! Every field is optional in the file; anything missing falls back to the
//! product defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::budget::FeedbackPolicy;
use crate::error::{ensure_finite, EngineError, LoadError, Result};
use crate::investment::{InvestmentScenario, MAX_YEARS};
use crate::projection::ProjectionConfig;

/// Ledger display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Category slices kept before the rest merge into "Other"
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// Days covered by the trailing expense series
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
}

fn default_top_categories() -> usize {
    5
}

fn default_trend_days() -> u32 {
    14
}

/// Longest trailing series accepted, about ten years
pub const MAX_TREND_DAYS: u32 = 3660;

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            top_categories: default_top_categories(),
            trend_days: default_trend_days(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub projection: ProjectionConfig,

    /// Starting plan for investment simulations
    #[serde(default)]
    pub investment: InvestmentScenario,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub feedback_policy: FeedbackPolicy,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> std::result::Result<Self, LoadError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> std::result::Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::info!("loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("projection.annual_hike_percent", self.projection.annual_hike_percent)?;
        ensure_finite("investment.principal", self.investment.principal)?;
        ensure_finite(
            "investment.monthly_contribution",
            self.investment.monthly_contribution,
        )?;
        ensure_finite(
            "investment.annual_rate_percent",
            self.investment.annual_rate_percent,
        )?;
        if self.investment.years > MAX_YEARS {
            return Err(EngineError::TooLarge {
                field: "investment.years",
                value: self.investment.years.into(),
                max: MAX_YEARS.into(),
            });
        }
        if self.ledger.top_categories == 0 {
            return Err(EngineError::Config(
                "ledger.top_categories must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_TREND_DAYS).contains(&self.ledger.trend_days) {
            return Err(EngineError::Config(format!(
                "ledger.trend_days must be within 1..={MAX_TREND_DAYS} (got {})",
                self.ledger.trend_days
            )));
        }
        Ok(())
    }
}
