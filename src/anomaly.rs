// ⚠️ Anomaly Detector - Trailing outlier check + concentration alerts
// Only the most recently added expense is ever tested, never the whole list

use crate::aggregate::category_ratios;
use crate::rules::Category;
use crate::store::ExpenseRecord;

/// Minimum number of records before the trailing check produces a verdict.
pub const MIN_RECORDS: usize = 3;

/// Share of total spend above which a category triggers a concentration
/// alert. Deliberately separate from the recommendation thresholds in
/// `insights`; the two sets of cutoffs are tuned independently.
pub const CONCENTRATION_THRESHOLD: f64 = 0.5;

// ============================================================================
// TRAILING OUTLIER CHECK
// ============================================================================

/// Outcome of the trailing anomaly check.
#[derive(Debug, Clone, PartialEq)]
pub enum AnomalyOutcome {
    /// Fewer than `MIN_RECORDS` records; informational, not an anomaly.
    InsufficientData,
    /// Last expense within mean + 2 * std-dev.
    Normal,
    /// Last expense exceeded the threshold.
    Unusual {
        amount: f64,
        mean: f64,
        threshold: f64,
    },
}

impl AnomalyOutcome {
    /// Human-readable sentence for display panels and Q&A answers.
    pub fn message(&self) -> String {
        match self {
            AnomalyOutcome::InsufficientData => {
                "Add more expenses to enable anomaly detection.".to_string()
            }
            AnomalyOutcome::Normal => "No unusual expenses detected.".to_string(),
            AnomalyOutcome::Unusual { amount, .. } => {
                format!("⚠️ Last expense of ₹{:.2} is unusually high!", amount)
            }
        }
    }
}

/// Test whether the most recently added expense is unusually large.
///
/// Mean and sample standard deviation (Bessel's correction, divide by n-1)
/// are computed over all amounts. "Last" is the record with the highest
/// insertion `seq`, not the one at the highest index: deletions may have
/// removed later positions. Flags iff the std-dev is positive and the last
/// amount strictly exceeds mean + 2 * std-dev. Trailing check only; older
/// records are never re-tested.
pub fn check_last(records: &[ExpenseRecord]) -> AnomalyOutcome {
    if records.len() < MIN_RECORDS {
        return AnomalyOutcome::InsufficientData;
    }

    let n = records.len() as f64;
    let mean = records.iter().map(|r| r.amount).sum::<f64>() / n;
    let variance = records
        .iter()
        .map(|r| (r.amount - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let std_dev = variance.sqrt();

    // Highest seq = most recently appended. records is non-empty here.
    let Some(last) = records.iter().max_by_key(|r| r.seq) else {
        return AnomalyOutcome::InsufficientData;
    };

    let threshold = mean + 2.0 * std_dev;
    if std_dev > 0.0 && last.amount > threshold {
        AnomalyOutcome::Unusual {
            amount: last.amount,
            mean,
            threshold,
        }
    } else {
        AnomalyOutcome::Normal
    }
}

// ============================================================================
// CONCENTRATION ALERTS
// ============================================================================

/// Warning that a single category holds more than half of total spend.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentrationAlert {
    pub category: Category,
    pub ratio: f64,
}

impl ConcentrationAlert {
    pub fn message(&self) -> String {
        format!(
            "⚠️ Over 50% of your spending is in {} ({:.1}%)",
            self.category,
            self.ratio * 100.0
        )
    }
}

/// Every category whose share of total spend exceeds the concentration
/// threshold. All categories are examined; with two categories each near
/// half the total, both alerts fire.
pub fn concentration_alerts(records: &[ExpenseRecord]) -> Vec<ConcentrationAlert> {
    category_ratios(records)
        .into_iter()
        .filter(|(_, ratio)| *ratio > CONCENTRATION_THRESHOLD)
        .map(|(category, ratio)| ConcentrationAlert { category, ratio })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
