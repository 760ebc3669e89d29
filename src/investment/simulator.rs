//! Compound-interest simulation with monthly contributions

use serde::{Deserialize, Serialize};

use super::returns::annualized_irr;
use crate::error::{ensure_finite, EngineError, Result};

/// Longest plan the simulator accepts
pub const MAX_YEARS: u32 = 100;

/// One year-end reading of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSnapshot {
    pub period_label: String,
    pub balance: f64,
    /// Principal plus every contribution made so far
    pub total_contributed: f64,
    /// Always `balance - total_contributed`
    pub interest_earned: f64,
}

impl InvestmentSnapshot {
    fn new(year: u32, balance: f64, total_contributed: f64) -> Self {
        Self {
            period_label: format!("Year {year}"),
            balance,
            total_contributed,
            interest_earned: balance - total_contributed,
        }
    }
}

/// Parameters of a single investment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentScenario {
    pub name: String,
    pub principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
}

impl InvestmentScenario {
    pub fn new(
        name: &str,
        principal: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        years: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            principal,
            monthly_contribution,
            annual_rate_percent,
            years,
        }
    }

    pub fn simulate(&self) -> Result<InvestmentRun> {
        let snapshots = simulate(
            self.principal,
            self.monthly_contribution,
            self.annual_rate_percent,
            self.years,
        )?;
        Ok(InvestmentRun {
            scenario: self.clone(),
            snapshots,
        })
    }
}

impl Default for InvestmentScenario {
    fn default() -> Self {
        Self::new("Default plan", 100_000.0, 15_000.0, 12.0, 5)
    }
}

/// A scenario together with its yearly snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRun {
    pub scenario: InvestmentScenario,
    pub snapshots: Vec<InvestmentSnapshot>,
}

impl InvestmentRun {
    pub fn final_snapshot(&self) -> Option<&InvestmentSnapshot> {
        self.snapshots.last()
    }

    /// Money-weighted annual return of the plan's cashflows.
    ///
    /// Principal is paid in at month 0, each contribution at the start of
    /// its month, and the final balance is taken out at the end.
    pub fn annualized_return(&self) -> Option<f64> {
        let last = self.final_snapshot()?;
        let months = self.scenario.years as usize * 12;

        let mut cashflows = vec![0.0; months + 1];
        cashflows[0] -= self.scenario.principal;
        for flow in cashflows.iter_mut().take(months) {
            *flow -= self.scenario.monthly_contribution;
        }
        cashflows[months] += last.balance;

        annualized_irr(&cashflows, 12)
    }
}

/// Grow `principal` plus monthly contributions at a monthly-compounded
/// annual rate. Emits one snapshot per year, `0..=years`.
///
/// Each contribution lands at the start of its month and earns that
/// month's interest. Zero or negative rates and contributions are
/// accepted as given; horizons past [`MAX_YEARS`] are rejected.
pub fn simulate(
    principal: f64,
    monthly_contribution: f64,
    annual_rate_percent: f64,
    years: u32,
) -> Result<Vec<InvestmentSnapshot>> {
    let principal = ensure_finite("principal", principal)?;
    let contribution = ensure_finite("monthly_contribution", monthly_contribution)?;
    let rate = ensure_finite("annual_rate_percent", annual_rate_percent)?;
    if years > MAX_YEARS {
        return Err(EngineError::TooLarge {
            field: "years",
            value: years.into(),
            max: MAX_YEARS.into(),
        });
    }

    let monthly_growth = 1.0 + rate / 100.0 / 12.0;
    let mut balance = principal;
    let mut contributed = principal;
    let mut snapshots = Vec::with_capacity(years as usize + 1);

    for year in 0..=years {
        snapshots.push(InvestmentSnapshot::new(year, balance, contributed));
        if year == years {
            break;
        }
        for _ in 0..12 {
            balance = (balance + contribution) * monthly_growth;
            contributed += contribution;
        }
    }

    Ok(snapshots)
}
