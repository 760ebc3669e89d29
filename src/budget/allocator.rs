//! Target allocation, spending limit and actual bucket spending

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ratios::BudgetRatios;
use crate::error::{ensure_finite, Result};
use crate::ledger::{Category, Transaction, TransactionKind};

/// Needs/wants/savings partition a category rolls up into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetBucket {
    Needs,
    Wants,
    Savings,
}

impl Category {
    /// Budget bucket this category belongs to
    pub fn bucket(&self) -> BudgetBucket {
        match self {
            Category::Housing
            | Category::Transport
            | Category::Utilities
            | Category::Health
            | Category::Food => BudgetBucket::Needs,
            Category::Entertainment | Category::Shopping | Category::Other => BudgetBucket::Wants,
            Category::Salary | Category::Freelance | Category::Investment | Category::Savings => {
                BudgetBucket::Savings
            }
        }
    }
}

/// Target amounts per bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub needs_amount: f64,
    pub wants_amount: f64,
    pub savings_amount: f64,
}

/// Split `base_balance` by the three percentages, unrounded
pub fn allocate(base_balance: f64, ratios: &BudgetRatios) -> Result<Allocation> {
    let base_balance = ensure_finite("balance", base_balance)?;
    let share = |percent: u32| base_balance * (percent as f64 / 100.0);
    Ok(Allocation {
        needs_amount: share(ratios.needs_percent),
        wants_amount: share(ratios.wants_percent),
        savings_amount: share(ratios.savings_percent),
    })
}

/// Spending ceiling: `floor(balance × (needs + wants) / 100)`
pub fn derive_limit(balance: f64, needs_percent: u32, wants_percent: u32) -> Result<i64> {
    let balance = ensure_finite("balance", balance)?;
    let spending_ratio = (needs_percent + wants_percent) as f64 / 100.0;
    Ok((balance * spending_ratio).floor() as i64)
}

/// What was actually spent per bucket in one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketSpending {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

impl BucketSpending {
    /// Needs + wants; savings is not spending
    pub fn total_spent(&self) -> f64 {
        self.needs + self.wants
    }
}

/// Bucket the transactions booked in the month of `reference`.
///
/// Expenses count toward needs or wants by category. Investments, and
/// anything filed under the savings category, count toward savings.
pub fn bucket_spending(transactions: &[Transaction], reference: NaiveDate) -> BucketSpending {
    let mut spending = BucketSpending::default();

    for tx in transactions.iter().filter(|t| t.in_month_of(reference)) {
        if tx.kind == TransactionKind::Expense {
            match tx.category.bucket() {
                BudgetBucket::Needs => spending.needs += tx.amount,
                BudgetBucket::Wants => spending.wants += tx.amount,
                BudgetBucket::Savings => {}
            }
        }
        if tx.kind == TransactionKind::Investment || tx.category == Category::Savings {
            spending.savings += tx.amount;
        }
    }

    spending
}

/// Traffic-light reading of the used share of the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLevel {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpendingHealth {
    /// Share of the limit used, capped at 100
    pub used_percent: f64,
    pub level: HealthLevel,
}

/// Compare spending against the monthly limit
pub fn spending_health(total_spent: f64, monthly_limit: i64) -> SpendingHealth {
    let used_percent = if monthly_limit <= 0 {
        if total_spent > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (total_spent / monthly_limit as f64 * 100.0).min(100.0)
    };

    let level = if used_percent > 95.0 {
        HealthLevel::Critical
    } else if used_percent > 75.0 {
        HealthLevel::Warning
    } else {
        HealthLevel::Healthy
    };

    SpendingHealth { used_percent, level }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use approx::assert_relative_eq;

    fn tx(amount: f64, kind: TransactionKind, category: Category, day: u32) -> Transaction {
        let at = NaiveDate::from_ymd_opt(2026, 7, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Transaction::new(amount, kind, category, at, None).unwrap()
    }

    #[test]
    fn test_allocate() {
        let ratios = BudgetRatios::new(50, 30, 20).unwrap();
        let allocation = allocate(100_000.0, &ratios).unwrap();

        assert_relative_eq!(allocation.needs_amount, 50_000.0);
        assert_relative_eq!(allocation.wants_amount, 30_000.0);
        assert_relative_eq!(allocation.savings_amount, 20_000.0);
    }

    #[test]
    fn test_allocate_keeps_fractions() {
        let ratios = BudgetRatios::new(33, 33, 34).unwrap();
        let allocation = allocate(1_000.5, &ratios).unwrap();
        assert_relative_eq!(allocation.needs_amount, 330.165, epsilon = 1e-9);
    }

    #[test]
    fn test_derive_limit() {
        assert_eq!(derive_limit(100_000.0, 50, 30), Ok(80_000));
        assert_eq!(derive_limit(99_999.0, 50, 30), Ok(79_999));
        assert_eq!(derive_limit(0.0, 50, 30), Ok(0));
    }

    #[test]
    fn test_rejects_non_finite_balance() {
        let nan = EngineError::NonFinite { field: "balance" };
        assert_eq!(derive_limit(f64::NAN, 50, 30), Err(nan.clone()));
        assert!(derive_limit(f64::INFINITY, 50, 30).is_err());
        assert!(derive_limit(f64::NEG_INFINITY, 50, 30).is_err());
        assert_eq!(allocate(f64::NAN, &BudgetRatios::default()), Err(nan));
        assert!(allocate(f64::INFINITY, &BudgetRatios::default()).is_err());
    }

    #[test]
    fn test_derive_limit_monotonic() {
        let mut previous = i64::MIN;
        for step in 0..200 {
            let limit = derive_limit(step as f64 * 777.7, 45, 35).unwrap();
            assert!(limit >= previous);
            previous = limit;
        }

        let mut previous = i64::MIN;
        for spendable in 0..=100 {
            let limit = derive_limit(12_345.67, spendable, 0).unwrap();
            assert!(limit >= previous);
            previous = limit;
        }
    }

    #[test]
    fn test_category_buckets() {
        assert_eq!(Category::Housing.bucket(), BudgetBucket::Needs);
        assert_eq!(Category::Food.bucket(), BudgetBucket::Needs);
        assert_eq!(Category::Shopping.bucket(), BudgetBucket::Wants);
        assert_eq!(Category::Other.bucket(), BudgetBucket::Wants);
        assert_eq!(Category::Savings.bucket(), BudgetBucket::Savings);
    }

    #[test]
    fn test_bucket_spending() {
        let txs = vec![
            tx(15_000.0, TransactionKind::Expense, Category::Housing, 1),
            tx(1_200.0, TransactionKind::Expense, Category::Food, 2),
            tx(2_500.0, TransactionKind::Expense, Category::Entertainment, 3),
            tx(10_000.0, TransactionKind::Investment, Category::Investment, 5),
            tx(3_000.0, TransactionKind::Expense, Category::Savings, 6),
            tx(90_000.0, TransactionKind::Income, Category::Salary, 1),
        ];
        let reference = NaiveDate::from_ymd_opt(2026, 7, 31).unwrap();
        let spending = bucket_spending(&txs, reference);

        assert_relative_eq!(spending.needs, 16_200.0);
        assert_relative_eq!(spending.wants, 2_500.0);
        assert_relative_eq!(spending.savings, 13_000.0);
        assert_relative_eq!(spending.total_spent(), 18_700.0);
    }

    #[test]
    fn test_spending_health_levels() {
        let health = spending_health(15_000.0, 30_000);
        assert_relative_eq!(health.used_percent, 50.0);
        assert_eq!(health.level, HealthLevel::Healthy);

        assert_eq!(spending_health(24_000.0, 30_000).level, HealthLevel::Warning);
        assert_eq!(spending_health(29_000.0, 30_000).level, HealthLevel::Critical);

        let over = spending_health(60_000.0, 30_000);
        assert_relative_eq!(over.used_percent, 100.0);
    }

    #[test]
    fn test_spending_health_without_limit() {
        assert_eq!(spending_health(0.0, 0).level, HealthLevel::Healthy);
        let health = spending_health(10.0, 0);
        assert_relative_eq!(health.used_percent, 100.0);
        assert_eq!(health.level, HealthLevel::Critical);
    }
}
