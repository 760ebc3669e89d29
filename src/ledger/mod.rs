//! Transaction records and the ledger aggregator

mod transaction;
mod aggregate;
pub mod loader;

pub use transaction::{Category, Transaction, TransactionId, TransactionKind};
pub use aggregate::{
    aggregate, daily_expense_series, group_top_categories, net_flow, sort_newest_first,
    CategoryTotal, DailyTotal, ExpenseGroup, LedgerSummary,
};
pub use loader::{load_transactions, load_transactions_from_reader};
