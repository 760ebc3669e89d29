//! Needs/wants/savings percentage split

use serde::{Deserialize, Serialize};

use crate::error::{ensure_percent, Result};

/// Three-way budget partition, in whole percent
///
/// Callers keep the three summing to 100. The constructor only checks the
/// per-bucket range; the edit helpers below rebalance savings themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRatios {
    pub needs_percent: u32,
    pub wants_percent: u32,
    pub savings_percent: u32,
}

impl BudgetRatios {
    pub fn new(needs_percent: u32, wants_percent: u32, savings_percent: u32) -> Result<Self> {
        Ok(Self {
            needs_percent: ensure_percent("needs_percent", needs_percent as i64)?,
            wants_percent: ensure_percent("wants_percent", wants_percent as i64)?,
            savings_percent: ensure_percent("savings_percent", savings_percent as i64)?,
        })
    }

    /// Re-check ranges on values built by deserialization
    pub fn validate(&self) -> Result<()> {
        Self::new(self.needs_percent, self.wants_percent, self.savings_percent).map(|_| ())
    }

    pub fn total(&self) -> u32 {
        self.needs_percent + self.wants_percent + self.savings_percent
    }

    /// Percent of the balance considered safe to spend (needs + wants)
    pub fn spendable_percent(&self) -> u32 {
        self.needs_percent + self.wants_percent
    }

    /// Set needs to `value` (clamped to 0..=100) and rebalance.
    ///
    /// Savings absorbs the difference. If needs + wants would exceed 100,
    /// wants is cut to `100 - needs` and savings drops to zero.
    pub fn with_needs(self, value: i64) -> Self {
        let needs = value.clamp(0, 100) as u32;
        let (wants, savings) = rebalance(needs, self.wants_percent);
        Self {
            needs_percent: needs,
            wants_percent: wants,
            savings_percent: savings,
        }
    }

    /// Mirror of [`BudgetRatios::with_needs`] for the wants bucket
    pub fn with_wants(self, value: i64) -> Self {
        let wants = value.clamp(0, 100) as u32;
        let (needs, savings) = rebalance(wants, self.needs_percent);
        Self {
            needs_percent: needs,
            wants_percent: wants,
            savings_percent: savings,
        }
    }
}

/// Given the edited bucket and the other spending bucket, return the
/// adjusted other bucket and savings
fn rebalance(edited: u32, other: u32) -> (u32, u32) {
    if edited + other > 100 {
        (100 - edited, 0)
    } else {
        (other, 100 - edited - other)
    }
}

impl Default for BudgetRatios {
    fn default() -> Self {
        Self {
            needs_percent: 50,
            wants_percent: 30,
            savings_percent: 20,
        }
    }
}
