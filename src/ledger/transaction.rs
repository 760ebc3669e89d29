//! Transaction records and their closed classification sets

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ensure_non_negative, EngineError, Result};

/// Opaque transaction identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of a transaction relative to the liquid balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
    /// Money moved into an investment; leaves the balance like an expense
    Investment,
}

impl TransactionKind {
    /// Whether the amount reduces the liquid balance
    pub fn is_outflow(&self) -> bool {
        matches!(self, TransactionKind::Expense | TransactionKind::Investment)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Investment => "Investment",
        }
    }

    /// Parse the persisted name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            "investment" => Some(TransactionKind::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spending/earning category tag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    Salary,
    Freelance,
    Food,
    Transport,
    Housing,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Investment,
    Savings,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Salary,
        Category::Freelance,
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Health,
        Category::Investment,
        Category::Savings,
        Category::Other,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Salary => "Salary/Credit",
            Category::Freelance => "Freelance",
            Category::Food => "Food & Dining",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Investment => "Investment",
            Category::Savings => "Savings",
            Category::Other => "Other",
        }
    }

    /// Parse either the variant name or the display label
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|c| {
            c.label().eq_ignore_ascii_case(value) || format!("{:?}", c).eq_ignore_ascii_case(value)
        })
    }

    /// Category actually recorded for an entry of the given kind.
    /// Income is always booked as salary and investments as investment;
    /// only expenses keep the category the user picked.
    pub fn default_for(kind: TransactionKind, chosen: Category) -> Category {
        match kind {
            TransactionKind::Income => Category::Salary,
            TransactionKind::Investment => Category::Investment,
            TransactionKind::Expense => chosen,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single recorded money movement
///
/// Deserialization goes through [`Transaction::with_id`], so JSON records
/// carry the same amount checks as constructed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Non-negative amount; direction comes from `kind`
    pub amount: f64,

    pub kind: TransactionKind,

    pub category: Category,

    /// Calendar date and time the transaction happened
    pub timestamp: NaiveDateTime,

    #[serde(default)]
    pub note: Option<String>,
}

/// Unchecked wire shape of a transaction
#[derive(Deserialize)]
struct TransactionRecord {
    id: TransactionId,
    amount: f64,
    kind: TransactionKind,
    category: Category,
    timestamp: NaiveDateTime,
    #[serde(default)]
    note: Option<String>,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = EngineError;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        Transaction::with_id(
            record.id,
            record.amount,
            record.kind,
            record.category,
            record.timestamp,
            record.note,
        )
    }
}

impl Transaction {
    /// Create a transaction with a generated identifier
    pub fn new(
        amount: f64,
        kind: TransactionKind,
        category: Category,
        timestamp: NaiveDateTime,
        note: Option<String>,
    ) -> Result<Self> {
        Self::with_id(TransactionId::generate(), amount, kind, category, timestamp, note)
    }

    /// Create a transaction with a caller-supplied identifier
    pub fn with_id(
        id: TransactionId,
        amount: f64,
        kind: TransactionKind,
        category: Category,
        timestamp: NaiveDateTime,
        note: Option<String>,
    ) -> Result<Self> {
        let amount = ensure_non_negative("amount", amount)?;
        Ok(Self {
            id,
            amount,
            kind,
            category,
            timestamp,
            note: note.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Signed effect on the liquid balance
    pub fn signed_amount(&self) -> f64 {
        if self.kind.is_outflow() {
            -self.amount
        } else {
            self.amount
        }
    }

    /// Whether the transaction falls in the calendar month of `reference`
    pub fn in_month_of(&self, reference: NaiveDate) -> bool {
        let date = self.timestamp.date();
        date.year() == reference.year() && date.month() == reference.month()
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
