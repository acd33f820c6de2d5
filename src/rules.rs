// 🏷️ Categorization Rules - Rules as Data
// Keyword membership rules mapping free-text descriptions to categories

use serde::{Deserialize, Serialize};

// ============================================================================
// CATEGORY
// ============================================================================

/// The six fixed spending categories.
///
/// Variant order is the rule priority order: when a description matches
/// keywords from several categories, the earliest variant here wins.
/// The derived `Ord` makes that same order the deterministic tie-break
/// everywhere aggregates are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Shopping,
    Entertainment,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Others => "Others",
        }
    }

    /// All categories in priority order.
    pub fn all() -> [Category; 6] {
        [
            Category::Food,
            Category::Transport,
            Category::Utilities,
            Category::Shopping,
            Category::Entertainment,
            Category::Others,
        ]
    }

    /// Food, Shopping and Entertainment are treated as reducible spend
    /// in insight messages.
    pub fn is_discretionary(&self) -> bool {
        matches!(
            self,
            Category::Food | Category::Shopping | Category::Entertainment
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// KEYWORD RULES
// ============================================================================

/// A single keyword rule: if the (lower-cased) description contains any of
/// the keywords as a substring, the expense belongs to `category`.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

impl KeywordRule {
    /// Substring match against an already lower-cased text.
    fn matches(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|kw| text_lower.contains(kw))
    }
}

/// Rule table in priority order. First matching rule wins, so e.g.
/// "netflix bill" lands in Utilities ("bill") before Entertainment
/// ("netflix") is ever tested. The ordering is load-bearing for
/// compatibility and must not be rearranged.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: Category::Food,
        keywords: &["food", "pizza", "burger", "restaurant", "cafe", "coffee"],
    },
    KeywordRule {
        category: Category::Transport,
        keywords: &["uber", "bus", "metro", "taxi", "train"],
    },
    KeywordRule {
        category: Category::Utilities,
        keywords: &["electricity", "water", "wifi", "gas", "bill", "recharge"],
    },
    KeywordRule {
        category: Category::Shopping,
        keywords: &["shopping", "clothes", "amazon", "flipkart", "mall"],
    },
    KeywordRule {
        category: Category::Entertainment,
        keywords: &["movie", "netflix", "game", "concert"],
    },
];

/// Classify a free-text description into a category.
///
/// Pure function: lower-cases the input, walks `KEYWORD_RULES` in priority
/// order, returns the first matching category, or `Others` when nothing
/// matches.
pub fn categorize(description: &str) -> Category {
    let text_lower = description.to_lowercase();

    for rule in KEYWORD_RULES {
        if rule.matches(&text_lower) {
            return rule.category;
        }
    }

    Category::Others
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_keywords() {
        assert_eq!(categorize("Pizza night"), Category::Food);
        assert_eq!(categorize("uber to airport"), Category::Transport);
        assert_eq!(categorize("electricity recharge"), Category::Utilities);
        assert_eq!(categorize("clothes from the mall"), Category::Shopping);
        assert_eq!(categorize("concert tickets"), Category::Entertainment);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize("STARBUCKS COFFEE"), Category::Food);
        assert_eq!(categorize("Amazon Order"), Category::Shopping);
    }

    #[test]
    fn test_substring_match() {
        // "bus" inside a longer word still matches, by design of the
        // substring rule.
        assert_eq!(categorize("airport busride"), Category::Transport);
    }

    #[test]
    fn test_unknown_falls_back_to_others() {
        assert_eq!(categorize("rent for october"), Category::Others);
        assert_eq!(categorize(""), Category::Others);
    }

    #[test]
    fn test_priority_utilities_before_entertainment() {
        // Matches both "bill" (Utilities) and "netflix" (Entertainment);
        // Utilities is tested first and must win.
        assert_eq!(categorize("netflix bill"), Category::Utilities);
        assert_eq!(categorize("bill netflix"), Category::Utilities);
        assert_eq!(categorize("NETFLIX BILL"), Category::Utilities);
    }

    #[test]
    fn test_priority_food_before_transport() {
        // "cafe" (Food) beats "metro" (Transport).
        assert_eq!(categorize("metro cafe"), Category::Food);
    }

    #[test]
    fn test_rule_table_order() {
        let order: Vec<Category> = KEYWORD_RULES.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Food,
                Category::Transport,
                Category::Utilities,
                Category::Shopping,
                Category::Entertainment,
            ]
        );
    }

    #[test]
    fn test_discretionary_flag() {
        assert!(Category::Food.is_discretionary());
        assert!(Category::Shopping.is_discretionary());
        assert!(Category::Entertainment.is_discretionary());
        assert!(!Category::Transport.is_discretionary());
        assert!(!Category::Utilities.is_discretionary());
        assert!(!Category::Others.is_discretionary());
    }
}
