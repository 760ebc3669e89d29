//! Adaptive feedback loop: nudge ratios and limit from user sentiment

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::state::BudgetState;

/// Points moved from savings to wants when the budget feels too strict
pub const RELAX_SHIFT: u32 = 3;

/// Points moved from wants to savings when the budget feels too easy
pub const TIGHTEN_SHIFT: u32 = 2;

/// Limit multiplier applied on relax
pub const RELAX_LIMIT_FACTOR: f64 = 1.05;

/// Limit multiplier applied on tighten
pub const TIGHTEN_LIMIT_FACTOR: f64 = 0.95;

/// Qualitative user reaction to the current budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    TooStrict,
    Good,
    TooEasy,
}

impl Sentiment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "toostrict" | "strict" => Some(Sentiment::TooStrict),
            "good" => Some(Sentiment::Good),
            "tooeasy" | "easy" => Some(Sentiment::TooEasy),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::TooStrict => "too strict",
            Sentiment::Good => "good",
            Sentiment::TooEasy => "too easy",
        };
        f.write_str(label)
    }
}

/// How the limit reacts when a percent shift is blocked by its guard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackPolicy {
    /// Limit always moves, even if the ratio shift was blocked
    #[default]
    Lenient,
    /// Limit only moves together with a ratio shift
    Strict,
}

/// New state plus a human-readable summary of what changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    pub state: BudgetState,
    /// Whether percentage points moved between buckets
    pub shifted: bool,
    pub description: String,
}

/// Apply one feedback event with the default (lenient) policy
pub fn apply_feedback(
    state: &BudgetState,
    sentiment: Sentiment,
    now: NaiveDateTime,
) -> FeedbackOutcome {
    apply_feedback_with(state, sentiment, now, FeedbackPolicy::Lenient)
}

/// Apply one feedback event.
///
/// `TooStrict` moves points from savings to wants and raises the limit by 5%;
/// `TooEasy` moves points from wants to savings and lowers it by 5%. A shift
/// never drives a percent below zero. `Good` returns the state untouched.
pub fn apply_feedback_with(
    state: &BudgetState,
    sentiment: Sentiment,
    now: NaiveDateTime,
    policy: FeedbackPolicy,
) -> FeedbackOutcome {
    let mut next = state.clone();

    let (shifted, factor) = match sentiment {
        Sentiment::Good => {
            return FeedbackOutcome {
                state: next,
                shifted: false,
                description: "no changes needed".to_string(),
            };
        }
        Sentiment::TooStrict => {
            let ratios = &mut next.ratios;
            let can_shift = ratios.savings_percent >= RELAX_SHIFT;
            if can_shift {
                ratios.wants_percent += RELAX_SHIFT;
                ratios.savings_percent -= RELAX_SHIFT;
            }
            (can_shift, RELAX_LIMIT_FACTOR)
        }
        Sentiment::TooEasy => {
            let ratios = &mut next.ratios;
            let can_shift = ratios.wants_percent >= TIGHTEN_SHIFT;
            if can_shift {
                ratios.wants_percent -= TIGHTEN_SHIFT;
                ratios.savings_percent += TIGHTEN_SHIFT;
            }
            (can_shift, TIGHTEN_LIMIT_FACTOR)
        }
    };

    let limit_moves = shifted || policy == FeedbackPolicy::Lenient;
    if limit_moves {
        next.monthly_limit = (next.monthly_limit as f64 * factor).floor() as i64;
    }
    next.last_feedback = Some(now);

    FeedbackOutcome {
        description: describe(sentiment, shifted, limit_moves),
        state: next,
        shifted,
    }
}

fn describe(sentiment: Sentiment, shifted: bool, limit_moved: bool) -> String {
    let (prefix, shift, limit) = match sentiment {
        Sentiment::TooStrict => (
            "Relaxed Budget",
            format!("Wants +{}%", RELAX_SHIFT),
            "Limit +5%",
        ),
        Sentiment::TooEasy => (
            "Tightened Budget",
            format!("Savings +{}%", TIGHTEN_SHIFT),
            "Limit -5%",
        ),
        Sentiment::Good => return "no changes needed".to_string(),
    };

    match (shifted, limit_moved) {
        (true, true) => format!("{prefix}: {shift}, {limit}"),
        (true, false) => format!("{prefix}: {shift}"),
        (false, true) => format!("{prefix}: {limit}"),
        (false, false) => "no changes possible".to_string(),
    }
}
