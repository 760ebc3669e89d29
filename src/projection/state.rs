//! Running state of a wealth projection

use crate::profile::Profile;

/// Values carried from one projected month to the next
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current month index (0 = the starting month)
    pub month: u32,

    /// Monthly income in effect this month
    pub income: f64,

    /// Opening balance plus everything saved so far
    pub balance: f64,

    /// Savings accumulated since the start of the run
    pub cumulative_saved: f64,

    /// Share of income saved each month, as a fraction
    pub savings_rate: f64,
}

impl ProjectionState {
    /// Initialize state at month 0
    pub fn from_profile(profile: &Profile, opening_balance: f64) -> Self {
        Self {
            month: 0,
            income: profile.monthly_income,
            balance: opening_balance,
            cumulative_saved: 0.0,
            savings_rate: profile.budget.ratios.savings_percent as f64 / 100.0,
        }
    }

    /// Whether this month closes a projection year
    pub fn is_year_boundary(&self) -> bool {
        self.month % 12 == 0
    }

    /// Year number of the current month
    pub fn year(&self) -> u32 {
        self.month / 12
    }

    /// Bank one month of savings at the current income
    pub fn accumulate(&mut self) {
        let saved = self.income * self.savings_rate;
        self.balance += saved;
        self.cumulative_saved += saved;
    }
}
