//! Liquid Engine - personal-finance calculation engine
//!
//! This library provides:
//! - Ledger aggregation (balance, monthly totals, category breakdowns)
//! - Needs/wants/savings budget allocation with an adaptive feedback loop
//! - Multi-year wealth projection with income steps and annual raises
//! - Compound-interest investment simulation
//! - Net take-home estimation from fixed pay

pub mod error;
pub mod ledger;
pub mod budget;
pub mod profile;
pub mod projection;
pub mod investment;
pub mod tax;
pub mod config;
pub mod scenario;
pub mod display;

// Re-export commonly used types
pub use error::{EngineError, LoadError, Result};
pub use ledger::{aggregate, LedgerSummary, Transaction, TransactionKind, Category};
pub use budget::{allocate, apply_feedback, derive_limit, BudgetRatios, BudgetState, Sentiment};
pub use profile::{FutureIncomeEvent, Profile};
pub use projection::{project, ProjectionConfig, ProjectionResult, ProjectionSnapshot};
pub use investment::{simulate, InvestmentScenario, InvestmentSnapshot};
pub use tax::{estimate_monthly_net, NetIncomeBreakdown, TaxRegime};
pub use config::EngineConfig;
pub use scenario::ScenarioRunner;
