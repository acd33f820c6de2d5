// 🔮 Recommendation Engine - Rule-based advice from category shares
// Two independent passes per refresh: overall insight, then per-category
// advisories. Both always run; nothing is deduplicated between them.

use crate::aggregate::{category_ratios, grand_total, top_category};
use crate::rules::Category;
use crate::store::ExpenseRecord;
use serde::{Deserialize, Serialize};

/// Shopping share of total spend above which the "reduce shopping"
/// advisory fires.
pub const SHOPPING_THRESHOLD: f64 = 0.30;

/// Food share above which the "food spending is high" advisory fires.
pub const FOOD_THRESHOLD: f64 = 0.25;

/// Entertainment share above which the low-cost entertainment tip fires.
pub const ENTERTAINMENT_THRESHOLD: f64 = 0.20;

/// Max-category share below which spending counts as well balanced.
/// Independent of the 0.5 concentration cutoff in `anomaly`.
pub const BALANCED_THRESHOLD: f64 = 0.30;

// ============================================================================
// ADVICE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Success,
}

/// One piece of advisory text plus how the UI should style it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub severity: Severity,
    pub text: String,
}

impl Advice {
    fn info(text: String) -> Self {
        Advice {
            severity: Severity::Info,
            text,
        }
    }

    fn warning(text: String) -> Self {
        Advice {
            severity: Severity::Warning,
            text,
        }
    }

    fn success(text: String) -> Self {
        Advice {
            severity: Severity::Success,
            text,
        }
    }
}

// ============================================================================
// PASS 1: OVERALL INSIGHT
// ============================================================================

/// Coarse summary of where the money went, evaluated once per refresh.
///
/// Names the highest-spending category, its amount and the grand total.
/// A discretionary top category (Food, Shopping, Entertainment) draws a
/// warning; anything else draws a positive message. Empty store yields no
/// output; callers show their own placeholder.
pub fn overall_insight(records: &[ExpenseRecord]) -> Vec<Advice> {
    let Some((top, amount)) = top_category(records) else {
        return Vec::new();
    };
    let total = grand_total(records);

    let mut advice = vec![
        Advice::info(format!("You spent the most on {} (₹{:.2})", top, amount)),
        Advice::info(format!("Your total spending is ₹{:.2}", total)),
    ];

    if top.is_discretionary() {
        advice.push(Advice::warning(
            "Consider reducing discretionary expenses to save more.".to_string(),
        ));
    } else {
        advice.push(Advice::success(
            "Your spending is mostly essential and well balanced.".to_string(),
        ));
    }

    advice
}

// ============================================================================
// PASS 2: PER-CATEGORY ADVISORIES
// ============================================================================

/// Next-month recommendations from category shares of total spend.
///
/// Each rule is evaluated independently; several can fire in one pass.
/// The "well balanced" message reads the max-category share on its own and
/// is not an else-branch of the three advisories.
pub fn recommendations(records: &[ExpenseRecord]) -> Vec<Advice> {
    let ratios = category_ratios(records);
    if ratios.is_empty() {
        return Vec::new();
    }

    let mut advice = Vec::new();

    for (category, ratio) in &ratios {
        let pct = ratio * 100.0;
        match category {
            Category::Shopping if *ratio > SHOPPING_THRESHOLD => {
                advice.push(Advice::warning(format!(
                    "🔮 Reduce Shopping expenses ({:.1}%)",
                    pct
                )));
            }
            Category::Food if *ratio > FOOD_THRESHOLD => {
                advice.push(Advice::info(format!(
                    "🔮 Food spending is high ({:.1}%)",
                    pct
                )));
            }
            Category::Entertainment if *ratio > ENTERTAINMENT_THRESHOLD => {
                advice.push(Advice::info(
                    "🔮 Try low-cost entertainment next month".to_string(),
                ));
            }
            _ => {}
        }
    }

    let max_share = ratios.values().cloned().fold(0.0_f64, f64::max);
    if max_share < BALANCED_THRESHOLD {
        advice.push(Advice::success("🔮 Your spending is well balanced.".to_string()));
    }

    advice
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
    fn test_empty_store_yields_nothing() {
        assert!(overall_insight(&[]).is_empty());
        assert!(recommendations(&[]).is_empty());
    }

    #[test]
    fn test_overall_insight_discretionary_warning() {
        let store = store_from(&[("pizza", 80.0), ("uber", 20.0)]);

        let advice = overall_insight(store.all());
        assert_eq!(advice.len(), 3);
        assert!(advice[0].text.contains("Food"));
        assert!(advice[0].text.contains("80.00"));
        assert!(advice[1].text.contains("100.00"));
        assert_eq!(advice[2].severity, Severity::Warning);
    }

    #[test]
    fn test_overall_insight_essential_success() {
        let store = store_from(&[("uber", 80.0), ("pizza", 20.0)]);

        let advice = overall_insight(store.all());
        assert_eq!(advice[2].severity, Severity::Success);
        assert!(advice[2].text.contains("well balanced"));
    }

    #[test]
    fn test_multiple_advisories_fire_together() {
        // Shopping 35% > 30% and Food 65% > 25% both fire; max share 0.65
        // is not below 0.30, so no balanced message.
        let store = store_from(&[("shopping spree", 35.0), ("pizza", 65.0)]);

        let advice = recommendations(store.all());
        assert_eq!(advice.len(), 2);
        assert!(advice.iter().any(|a| a.text.contains("Food spending is high (65.0%)")));
        assert!(advice.iter().any(|a| a.text.contains("Reduce Shopping expenses (35.0%)")));
        assert!(!advice.iter().any(|a| a.severity == Severity::Success));
    }

    #[test]
    fn test_entertainment_tip() {
        let store = store_from(&[("netflix subscription", 25.0), ("rent", 75.0)]);

        let advice = recommendations(store.all());
        assert!(advice
            .iter()
            .any(|a| a.text.contains("low-cost entertainment")));
    }

    #[test]
    fn test_balanced_message_when_spend_is_diffuse() {
        // Four categories at 25% each: every share below every advisory
        // threshold except Food (25% is not > 25%), max share 0.25 < 0.30.
        let store = store_from(&[
            ("pizza", 25.0),
            ("uber", 25.0),
            ("wifi", 25.0),
            ("rent", 25.0),
        ]);

        let advice = recommendations(store.all());
        assert_eq!(advice.len(), 1);
        assert_eq!(advice[0].severity, Severity::Success);
        assert!(advice[0].text.contains("well balanced"));
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Shopping exactly 30% must not fire.
        let store = store_from(&[("mall", 30.0), ("rent", 70.0)]);
        let advice = recommendations(store.all());
        assert!(!advice.iter().any(|a| a.text.contains("Shopping")));
    }
}
