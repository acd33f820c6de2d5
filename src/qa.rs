// 📚 Quick Q&A - Fixed question menu answered from the current store
// Stateless dispatch: each question maps to a pure handler over the records

use crate::aggregate::category_totals;
use crate::anomaly::check_last;
use crate::store::ExpenseRecord;

/// Uniform reply for questions that need at least one expense.
const EMPTY_STORE_REPLY: &str = "No expenses recorded yet.";

// ============================================================================
// QUESTIONS
// ============================================================================

/// The fixed menu of pre-saved questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    SaveMoney,
    LeastSpentCategories,
    NextMonthTips,
    UnusualSpending,
}

impl Question {
    /// Menu order, as presented in the selection list.
    pub fn all() -> [Question; 4] {
        [
            Question::SaveMoney,
            Question::LeastSpentCategories,
            Question::NextMonthTips,
            Question::UnusualSpending,
        ]
    }

    /// The question text shown in the selection list.
    pub fn prompt(&self) -> &'static str {
        match self {
            Question::SaveMoney => "Where should I save money?",
            Question::LeastSpentCategories => "What are the least spent categories?",
            Question::NextMonthTips => "Any tips for next month?",
            Question::UnusualSpending => "Any unusual spendings I have done?",
        }
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Answer a pre-saved question from the current records.
///
/// Every question except the anomaly one falls back to a uniform "no
/// expenses" reply on an empty store; the anomaly question tolerates an
/// empty store through the detector's own insufficient-data message.
pub fn answer(question: Question, records: &[ExpenseRecord]) -> String {
    match question {
        Question::SaveMoney => {
            if records.is_empty() {
                EMPTY_STORE_REPLY.to_string()
            } else {
                "💡 Consider reducing spending on Food, Shopping, and Entertainment to save more."
                    .to_string()
            }
        }
        Question::LeastSpentCategories => {
            if records.is_empty() {
                EMPTY_STORE_REPLY.to_string()
            } else {
                format!(
                    "The categories you spend the least on are: {}",
                    least_spent(records, 2).join(", ")
                )
            }
        }
        Question::NextMonthTips => {
            if records.is_empty() {
                EMPTY_STORE_REPLY.to_string()
            } else {
                "🔮 Try setting a budget and tracking your spending weekly for better savings."
                    .to_string()
            }
        }
        Question::UnusualSpending => check_last(records).message(),
    }
}

/// Up to `count` category names with the smallest totals, ascending.
/// Equal totals keep the fixed category priority order.
fn least_spent(records: &[ExpenseRecord], count: usize) -> Vec<String> {
    let mut totals: Vec<_> = category_totals(records).into_iter().collect();
    // BTreeMap already yields category order; a stable sort on the amount
    // keeps that order as the tie-break.
    totals.sort_by(|a, b| a.1.total_cmp(&b.1));

    totals
        .into_iter()
        .take(count)
        .map(|(category, _)| category.to_string())
        .collect()
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
    fn test_empty_store_fallback() {
        assert_eq!(answer(Question::SaveMoney, &[]), "No expenses recorded yet.");
        assert_eq!(
            answer(Question::LeastSpentCategories, &[]),
            "No expenses recorded yet."
        );
        assert_eq!(
            answer(Question::NextMonthTips, &[]),
            "No expenses recorded yet."
        );
    }

    #[test]
    fn test_unusual_spending_tolerates_empty_store() {
        assert_eq!(
            answer(Question::UnusualSpending, &[]),
            "Add more expenses to enable anomaly detection."
        );
    }

    #[test]
    fn test_least_spent_two_categories_ascending() {
        let store = store_from(&[("pizza", 300.0), ("uber", 10.0), ("wifi", 50.0)]);

        let reply = answer(Question::LeastSpentCategories, store.all());
        assert_eq!(
            reply,
            "The categories you spend the least on are: Transport, Utilities"
        );
    }

    #[test]
    fn test_least_spent_with_single_category() {
        let store = store_from(&[("pizza", 25.0)]);

        let reply = answer(Question::LeastSpentCategories, store.all());
        assert_eq!(reply, "The categories you spend the least on are: Food");
    }

    #[test]
    fn test_unusual_spending_reports_anomaly() {
        let mut amounts: Vec<(String, f64)> = (0..9).map(|_| ("rent".to_string(), 1.0)).collect();
        amounts.push(("rent".to_string(), 1000.0));

        let mut store = ExpenseStore::new();
        for (description, amount) in &amounts {
            store.add(description, *amount).unwrap();
        }

        let reply = answer(Question::UnusualSpending, store.all());
        assert!(reply.contains("unusually high"));
        assert!(reply.contains("1000.00"));
    }

    #[test]
    fn test_prompts_are_stable() {
        assert_eq!(Question::all().len(), 4);
        assert_eq!(Question::SaveMoney.prompt(), "Where should I save money?");
        assert_eq!(
            Question::UnusualSpending.prompt(),
            "Any unusual spendings I have done?"
        );
    }
}
