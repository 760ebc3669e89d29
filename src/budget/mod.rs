//! Budget allocator and the adaptive feedback loop

mod ratios;
mod state;
mod allocator;
mod feedback;

pub use ratios::BudgetRatios;
pub use state::BudgetState;
pub use allocator::{
    allocate, bucket_spending, derive_limit, spending_health, Allocation, BucketSpending,
    BudgetBucket, HealthLevel, SpendingHealth,
};
pub use feedback::{
    apply_feedback, apply_feedback_with, FeedbackOutcome, FeedbackPolicy, Sentiment,
};
