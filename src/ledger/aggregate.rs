//! Folding a transaction collection into balance and period totals

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::{Category, Transaction, TransactionKind};

/// Expense total grouping: one category, or the merged remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseGroup {
    Category(Category),
    /// Everything past the top-N cut
    Remainder,
}

impl ExpenseGroup {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseGroup::Category(category) => category.label(),
            ExpenseGroup::Remainder => "Other",
        }
    }
}

impl fmt::Display for ExpenseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summed expense amount for one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub group: ExpenseGroup,
    pub total: f64,
}

/// Result of folding the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Base balance plus every transaction's signed effect
    pub current_balance: f64,

    /// Income booked in the reference month
    pub monthly_income_actual: f64,

    /// Expenses booked in the reference month (investments excluded)
    pub monthly_expense_actual: f64,

    /// Expense totals per category over all transactions, largest first
    pub expense_by_category: Vec<CategoryTotal>,
}

impl LedgerSummary {
    /// Category totals cut down to `limit` entries
    pub fn top_categories(&self, limit: usize) -> Vec<CategoryTotal> {
        group_top_categories(&self.expense_by_category, limit)
    }
}

/// One day of the trailing expense series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Σincome − Σ(expense + investment)
pub fn net_flow(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::signed_amount).sum()
}

/// Fold `transactions` on top of `base_balance`.
///
/// Monthly figures only count transactions in the calendar month of
/// `reference`. Category totals cover the whole collection.
pub fn aggregate(
    base_balance: f64,
    transactions: &[Transaction],
    reference: NaiveDate,
) -> LedgerSummary {
    let mut monthly_income = 0.0;
    let mut monthly_expense = 0.0;
    let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();

    for tx in transactions {
        if tx.kind == TransactionKind::Expense {
            *by_category.entry(tx.category).or_insert(0.0) += tx.amount;
        }

        if !tx.in_month_of(reference) {
            continue;
        }
        match tx.kind {
            TransactionKind::Income => monthly_income += tx.amount,
            TransactionKind::Expense => monthly_expense += tx.amount,
            TransactionKind::Investment => {}
        }
    }

    LedgerSummary {
        current_balance: base_balance + net_flow(transactions),
        monthly_income_actual: monthly_income,
        monthly_expense_actual: monthly_expense,
        expense_by_category: sorted_totals(by_category),
    }
}

/// Largest total first; ties keep category declaration order
fn sorted_totals(by_category: BTreeMap<Category, f64>) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            group: ExpenseGroup::Category(category),
            total,
        })
        .collect();
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Keep at most `limit` entries: when there are more groups than that,
/// the largest `limit - 1` survive and the rest merge into one remainder.
pub fn group_top_categories(totals: &[CategoryTotal], limit: usize) -> Vec<CategoryTotal> {
    let limit = limit.max(1);
    if totals.len() <= limit {
        return totals.to_vec();
    }

    let keep = limit - 1;
    let mut grouped: Vec<CategoryTotal> = totals[..keep].to_vec();
    let remainder: f64 = totals[keep..].iter().map(|t| t.total).sum();
    grouped.push(CategoryTotal {
        group: ExpenseGroup::Remainder,
        total: remainder,
    });
    grouped
}

/// Expense totals for each of the `days` days ending on `today`, oldest first.
///
/// The series starts late rather than running past the earliest
/// representable date.
pub fn daily_expense_series(
    transactions: &[Transaction],
    today: NaiveDate,
    days: u32,
) -> Vec<DailyTotal> {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.kind == TransactionKind::Expense) {
        *per_day.entry(tx.date()).or_insert(0.0) += tx.amount;
    }

    let mut series: Vec<DailyTotal> = (0..days)
        .map_while(|offset| today.checked_sub_signed(Duration::days(offset as i64)))
        .map(|date| DailyTotal {
            date,
            amount: per_day.get(&date).copied().unwrap_or(0.0),
        })
        .collect();
    series.reverse();
    series
}

/// Copy of the ledger ordered newest first
pub fn sort_newest_first(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}
