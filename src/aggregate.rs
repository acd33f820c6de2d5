// 📊 Aggregator - Per-category sums and ratios
// Derived views, recomputed fresh from the full store on every query

use crate::rules::Category;
use crate::store::ExpenseRecord;
use std::collections::BTreeMap;

/// Sum the amounts of each category present in `records`.
///
/// Categories with no records are simply absent from the map, never present
/// with zero. BTreeMap keyed on `Category` iterates in the fixed priority
/// order, which keeps every downstream consumer deterministic.
pub fn category_totals(records: &[ExpenseRecord]) -> BTreeMap<Category, f64> {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();

    for record in records {
        *totals.entry(record.category).or_insert(0.0) += record.amount;
    }

    totals
}

/// Each category's share of total spend, as a fraction in (0, 1].
///
/// Empty input yields an empty map; the grand total is only used as a
/// divisor when at least one record exists, so division by zero cannot
/// occur (record amounts are strictly positive by store invariant).
pub fn category_ratios(records: &[ExpenseRecord]) -> BTreeMap<Category, f64> {
    let total = grand_total(records);
    if total <= 0.0 {
        return BTreeMap::new();
    }

    category_totals(records)
        .into_iter()
        .map(|(category, sum)| (category, sum / total))
        .collect()
}

/// Category with the highest summed amount, with that amount.
///
/// Returns `None` for an empty store. Ties break toward the category
/// earliest in the fixed priority order (Food first, Others last): the
/// BTreeMap walks categories in that order and a later equal total does
/// not displace an earlier one.
pub fn top_category(records: &[ExpenseRecord]) -> Option<(Category, f64)> {
    let mut best: Option<(Category, f64)> = None;

    for (category, sum) in category_totals(records) {
        match best {
            Some((_, best_sum)) if sum <= best_sum => {}
            _ => best = Some((category, sum)),
        }
    }

    best
}

/// Total spend across all records.
pub fn grand_total(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ExpenseStore;

    fn store_from(entries: &[(&str, f64)]) -> ExpenseStore {
        let mut store = ExpenseStore::new();
        for (description, amount) in entries {
            store.add(description, *amount).unwrap();
        }
        store
    }

    #[test]
    fn test_category_totals_groups_and_sums() {
        // Food once, Transport twice: {Food: 100, Transport: 200}.
        let store = store_from(&[("pizza", 100.0), ("uber", 100.0), ("taxi", 100.0)]);

        let totals = category_totals(store.all());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&Category::Food], 100.0);
        assert_eq!(totals[&Category::Transport], 200.0);
        assert!(!totals.contains_key(&Category::Shopping));
    }

    #[test]
    fn test_category_totals_is_idempotent() {
        let store = store_from(&[("pizza", 50.0), ("uber", 20.0)]);

        let first = category_totals(store.all());
        let second = category_totals(store.all());
        assert_eq!(first, second);
        // Input slice untouched.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_category_ratios() {
        let store = store_from(&[("pizza", 100.0), ("uber", 100.0), ("taxi", 100.0)]);

        let ratios = category_ratios(store.all());
        assert!((ratios[&Category::Food] - 1.0 / 3.0).abs() < 1e-12);
        assert!((ratios[&Category::Transport] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        assert!(category_totals(&[]).is_empty());
        assert!(category_ratios(&[]).is_empty());
        assert_eq!(top_category(&[]), None);
        assert_eq!(grand_total(&[]), 0.0);
    }

    #[test]
    fn test_top_category() {
        let store = store_from(&[("pizza", 30.0), ("uber", 70.0)]);
        assert_eq!(top_category(store.all()), Some((Category::Transport, 70.0)));
    }

    #[test]
    fn test_top_category_tie_breaks_by_priority_order() {
        // Food and Transport both at 50: Food precedes Transport in the
        // fixed order and must win.
        let store = store_from(&[("uber", 50.0), ("pizza", 50.0)]);
        assert_eq!(top_category(store.all()), Some((Category::Food, 50.0)));
    }
}
