//! Budget settings owned by the caller between feedback rounds

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::allocator::derive_limit;
use super::ratios::BudgetRatios;
use crate::error::{ensure_non_negative, Result};

/// Ratios plus the derived spending ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetState {
    #[serde(flatten)]
    pub ratios: BudgetRatios,

    /// Monthly spending ceiling
    pub monthly_limit: i64,

    /// Fixed monthly outgoings such as rent
    #[serde(default)]
    pub recurring_expenses: f64,

    /// When the last sentiment feedback was applied
    #[serde(default)]
    pub last_feedback: Option<NaiveDateTime>,
}

impl BudgetState {
    pub fn new(ratios: BudgetRatios, monthly_limit: i64) -> Self {
        Self {
            ratios,
            monthly_limit,
            recurring_expenses: 0.0,
            last_feedback: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.ratios.validate()?;
        ensure_non_negative("recurring_expenses", self.recurring_expenses)?;
        Ok(())
    }

    /// Recompute the limit after the balance or a spending ratio changed
    ///
    /// A non-finite balance is rejected and leaves the state untouched.
    pub fn rederive_limit(&mut self, balance: f64) -> Result<()> {
        self.monthly_limit = derive_limit(
            balance,
            self.ratios.needs_percent,
            self.ratios.wants_percent,
        )?;
        Ok(())
    }

    /// Apply a needs edit and re-derive the limit against `balance`
    pub fn edit_needs(&mut self, value: i64, balance: f64) -> Result<()> {
        let ratios = self.ratios.with_needs(value);
        self.apply_edit(ratios, balance)
    }

    /// Apply a wants edit and re-derive the limit against `balance`
    pub fn edit_wants(&mut self, value: i64, balance: f64) -> Result<()> {
        let ratios = self.ratios.with_wants(value);
        self.apply_edit(ratios, balance)
    }

    fn apply_edit(&mut self, ratios: BudgetRatios, balance: f64) -> Result<()> {
        self.monthly_limit = derive_limit(balance, ratios.needs_percent, ratios.wants_percent)?;
        self.ratios = ratios;
        Ok(())
    }
}

impl Default for BudgetState {
    fn default() -> Self {
        Self::new(BudgetRatios::default(), 30_000)
    }
}
