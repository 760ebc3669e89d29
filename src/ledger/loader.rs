//! Load transactions from CSV exports
//!
//! Expected header: `id,amount,kind,category,timestamp,note`. The `id` and
//! `note` columns may be empty; a missing id gets a generated one.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::Reader;

use super::{Category, Transaction, TransactionId, TransactionKind};
use crate::error::LoadError;

/// Raw CSV row before domain validation
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: String,
    amount: f64,
    kind: String,
    category: String,
    timestamp: String,
    #[serde(default)]
    note: String,
}

impl CsvRow {
    fn to_transaction(self, line: u64) -> Result<Transaction, LoadError> {
        let kind = TransactionKind::parse(&self.kind).ok_or_else(|| LoadError::UnknownVariant {
            line,
            field: "kind",
            value: self.kind.clone(),
        })?;

        let category =
            Category::parse(&self.category).ok_or_else(|| LoadError::UnknownVariant {
                line,
                field: "category",
                value: self.category.clone(),
            })?;

        let timestamp = parse_timestamp(&self.timestamp).ok_or_else(|| LoadError::Timestamp {
            line,
            value: self.timestamp.clone(),
        })?;

        let id = if self.id.trim().is_empty() {
            TransactionId::generate()
        } else {
            TransactionId::from(self.id.trim())
        };
        let note = Some(self.note).filter(|n| !n.trim().is_empty());

        Transaction::with_id(id, self.amount, kind, category, timestamp, note)
            .map_err(|source| LoadError::Invalid { line, source })
    }
}

/// Accepts RFC 3339 (offset kept as wall-clock time), `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS[.f]` and bare dates (midnight)
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Load all transactions from a CSV file
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, LoadError> {
    let path = path.as_ref();
    log::debug!("loading transactions from {}", path.display());
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load transactions from any reader (string buffer, stdin, ...)
pub fn load_transactions_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<Transaction>, LoadError> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Transaction>, LoadError> {
    let mut transactions = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        // Header is line 1
        let line = index as u64 + 2;
        let row: CsvRow = result?;
        transactions.push(row.to_transaction(line)?);
    }

    log::debug!("loaded {} transactions", transactions.len());
    Ok(transactions)
}
