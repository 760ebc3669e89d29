//! User profile: calibration anchor, income and budget settings

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::budget::BudgetState;
use crate::error::{ensure_finite, ensure_non_negative, LoadError, Result};
use crate::ledger::{net_flow, Transaction};

/// A one-time change of monthly income at a future month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureIncomeEvent {
    pub enabled: bool,
    pub new_monthly_income: f64,
    /// Month index (0-based) at which the new income applies
    pub months_until_start: u32,
    #[serde(default)]
    pub description: String,
}

impl FutureIncomeEvent {
    pub fn new(new_monthly_income: f64, months_until_start: u32, description: &str) -> Self {
        Self {
            enabled: true,
            new_monthly_income,
            months_until_start,
            description: description.to_string(),
        }
    }

    /// Income in effect at month `month`, if the event fires there
    pub fn fires_at(&self, month: u32) -> Option<f64> {
        (self.enabled && month == self.months_until_start).then_some(self.new_monthly_income)
    }
}

impl Default for FutureIncomeEvent {
    fn default() -> Self {
        Self {
            enabled: false,
            new_monthly_income: 0.0,
            months_until_start: 0,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Balance excluding every recorded transaction
    pub base_balance: f64,
    pub monthly_income: f64,
    #[serde(default)]
    pub budget: BudgetState,
    #[serde(default)]
    pub future_income: FutureIncomeEvent,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            base_balance: 0.0,
            monthly_income: 0.0,
            budget: BudgetState::default(),
            future_income: FutureIncomeEvent::default(),
        }
    }
}

impl Profile {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("base_balance", self.base_balance)?;
        ensure_non_negative("monthly_income", self.monthly_income)?;
        if self.future_income.enabled {
            ensure_non_negative("new_monthly_income", self.future_income.new_monthly_income)?;
        }
        self.budget.validate()
    }

    /// Re-anchor the base balance so the ledger shows `display_balance`
    pub fn calibrate(&self, display_balance: f64, transactions: &[Transaction]) -> Result<Self> {
        let display_balance = ensure_finite("display_balance", display_balance)?;
        Ok(Self {
            base_balance: display_balance - net_flow(transactions),
            ..self.clone()
        })
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> std::result::Result<Self, LoadError> {
        let file = File::open(path.as_ref())?;
        let profile: Profile = serde_json::from_reader(BufReader::new(file))?;
        profile.validate()?;
        log::debug!("loaded profile from {}", path.as_ref().display());
        Ok(profile)
    }

    pub fn to_json_path<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), LoadError> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        log::debug!("wrote profile to {}", path.as_ref().display());
        Ok(())
    }
}
