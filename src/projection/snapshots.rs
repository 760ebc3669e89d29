//! Yearly output of a wealth projection

use serde::{Deserialize, Serialize};

use super::state::ProjectionState;

/// Net-worth reading at one year boundary, rounded to whole units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSnapshot {
    pub period_label: String,
    pub projected_balance: f64,
    pub projected_income: f64,
    pub cumulative_saved: f64,
}

impl ProjectionSnapshot {
    pub fn from_state(state: &ProjectionState) -> Self {
        Self {
            period_label: format!("Year {}", state.year()),
            projected_balance: round_half_up(state.balance),
            projected_income: round_half_up(state.income),
            cumulative_saved: round_half_up(state.cumulative_saved),
        }
    }
}

/// Halves round toward positive infinity
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Complete projection result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Yearly snapshots, oldest first
    pub snapshots: Vec<ProjectionSnapshot>,

    /// Annual raise the run was computed with
    pub annual_hike_percent: f64,
}

impl ProjectionResult {
    pub fn new(annual_hike_percent: f64) -> Self {
        Self {
            snapshots: Vec::new(),
            annual_hike_percent,
        }
    }

    /// Add a snapshot
    pub fn add_snapshot(&mut self, snapshot: ProjectionSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.snapshots.last();
        ProjectionSummary {
            years: self.snapshots.len().saturating_sub(1) as u32,
            final_balance: last.map(|s| s.projected_balance).unwrap_or(0.0),
            final_income: last.map(|s| s.projected_income).unwrap_or(0.0),
            total_saved: last.map(|s| s.cumulative_saved).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub final_balance: f64,
    pub final_income: f64,
    pub total_saved: f64,
}
