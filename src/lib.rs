// Spendwise - Core Library
// Exposes all modules for use in the TUI, API server, and tests

pub mod rules;
pub mod store;
pub mod aggregate;
pub mod anomaly;
pub mod insights;
pub mod qa;
pub mod session;

// Re-export commonly used types
pub use rules::{categorize, Category, KeywordRule, KEYWORD_RULES};
pub use store::{ExpenseError, ExpenseRecord, ExpenseStore};
pub use aggregate::{category_ratios, category_totals, grand_total, top_category};
pub use anomaly::{
    check_last, concentration_alerts, AnomalyOutcome, ConcentrationAlert,
    CONCENTRATION_THRESHOLD, MIN_RECORDS,
};
pub use insights::{overall_insight, recommendations, Advice, Severity};
pub use qa::{answer, Question};
pub use session::{ChatMessage, ChatRole, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
