// 💾 Expense Store - Ordered in-memory expense records
// Session-scoped storage: append, positional delete, read-only snapshots

use crate::rules::{categorize, Category};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// EXPENSE RECORD
// ============================================================================

/// A single recorded expense.
///
/// Immutable once created; the only mutation the store allows is wholesale
/// deletion. `seq` is a monotonically increasing insertion number, assigned
/// by the store and never reused. Positional indexes shift on delete, `seq`
/// does not, so "most recently added" is always the record with the highest
/// `seq`, whatever its current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub seq: u64,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub added_at: DateTime<Utc>,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Rejections surfaced to the user as non-fatal warnings. None of these
/// mutate the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseError {
    EmptyDescription,
    NonPositiveAmount { amount: f64 },
    PositionOutOfRange { position: usize, len: usize },
}

impl std::fmt::Display for ExpenseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseError::EmptyDescription => {
                write!(f, "Please enter a valid description.")
            }
            ExpenseError::NonPositiveAmount { amount } => {
                write!(f, "Amount must be greater than zero (got {:.2}).", amount)
            }
            ExpenseError::PositionOutOfRange { position, len } => {
                write!(
                    f,
                    "No expense at position {} (store has {} records).",
                    position, len
                )
            }
        }
    }
}

impl std::error::Error for ExpenseError {}

// ============================================================================
// EXPENSE STORE
// ============================================================================

/// Ordered, session-scoped collection of expense records.
///
/// Insertion order is chronological order. Single logical user, single
/// thread: no internal locking. Invariant, checked at insertion only: no
/// record has an empty description or a non-positive amount.
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    records: Vec<ExpenseRecord>,
    next_seq: u64,
}

impl ExpenseStore {
    pub fn new() -> Self {
        ExpenseStore {
            records: Vec::new(),
            next_seq: 0,
        }
    }

    /// Validate, categorize and append a new expense.
    ///
    /// Returns the assigned category for user feedback. Rejected input
    /// leaves the store untouched.
    pub fn add(&mut self, description: &str, amount: f64) -> Result<Category, ExpenseError> {
        if description.trim().is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }
        if amount <= 0.0 || !amount.is_finite() {
            return Err(ExpenseError::NonPositiveAmount { amount });
        }

        let category = categorize(description);
        let seq = self.next_seq;
        self.next_seq += 1;

        self.records.push(ExpenseRecord {
            seq,
            description: description.to_string(),
            amount,
            category,
            added_at: Utc::now(),
        });

        Ok(category)
    }

    /// Remove the record at `position` in the current order.
    ///
    /// Subsequent records shift down by one, so positions held across a
    /// delete are invalid; callers must re-derive them from the current
    /// store state. An out-of-range position (including a repeat of a
    /// just-deleted one) is an explicit rejection, never a panic.
    pub fn delete(&mut self, position: usize) -> Result<ExpenseRecord, ExpenseError> {
        if position >= self.records.len() {
            return Err(ExpenseError::PositionOutOfRange {
                position,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(position))
    }

    /// Read-only snapshot in insertion order.
    pub fn all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_assigns_category() {
        let mut store = ExpenseStore::new();
        let category = store.add("pizza dinner", 25.0).unwrap();
        assert_eq!(category, Category::Food);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].description, "pizza dinner");
        assert_eq!(store.all()[0].amount, 25.0);
    }

    #[test]
    fn test_add_rejects_empty_description() {
        let mut store = ExpenseStore::new();
        assert_eq!(store.add("", 10.0), Err(ExpenseError::EmptyDescription));
        assert_eq!(
            store.add("   ", 10.0),
            Err(ExpenseError::EmptyDescription)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_rejects_non_positive_amount() {
        let mut store = ExpenseStore::new();
        assert_eq!(
            store.add("desc", 0.0),
            Err(ExpenseError::NonPositiveAmount { amount: 0.0 })
        );
        assert_eq!(
            store.add("desc", -5.0),
            Err(ExpenseError::NonPositiveAmount { amount: -5.0 })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_seq_is_monotonic_across_deletes() {
        let mut store = ExpenseStore::new();
        store.add("a", 1.0).unwrap();
        store.add("b", 2.0).unwrap();
        store.delete(0).unwrap();
        store.add("c", 3.0).unwrap();

        let seqs: Vec<u64> = store.all().iter().map(|r| r.seq).collect();
        // "a" had seq 0; its deletion must not free the number.
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn test_delete_shifts_positions() {
        let mut store = ExpenseStore::new();
        store.add("a", 1.0).unwrap();
        store.add("b", 2.0).unwrap();
        store.add("c", 3.0).unwrap();

        let removed = store.delete(1).unwrap();
        assert_eq!(removed.description, "b");

        let names: Vec<&str> = store.all().iter().map(|r| r.description.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_record_serializes_for_chart_payloads() {
        let mut store = ExpenseStore::new();
        store.add("netflix bill", 499.0).unwrap();

        let json = serde_json::to_value(&store.all()[0]).unwrap();
        assert_eq!(json["description"], "netflix bill");
        assert_eq!(json["amount"], 499.0);
        assert_eq!(json["category"], "Utilities");
        assert_eq!(json["seq"], 0);
    }

    #[test]
    fn test_double_delete_same_position_is_rejected() {
        let mut store = ExpenseStore::new();
        store.add("a", 1.0).unwrap();
        store.add("b", 2.0).unwrap();

        store.delete(1).unwrap();
        // Position 1 is now out of range; explicit rejection, no panic,
        // store left intact.
        assert_eq!(
            store.delete(1),
            Err(ExpenseError::PositionOutOfRange {
                position: 1,
                len: 1
            })
        );
        assert_eq!(store.len(), 1);
    }
}
