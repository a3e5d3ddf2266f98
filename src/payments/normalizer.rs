//! Period normalization and deduplication of reprocessed payslips

use super::{BenefitConcepts, PaymentRecord};
use log::debug;
use std::collections::HashSet;

/// Key used when a record carries no period label
pub const MISSING_PERIOD_KEY: &str = "sin-periodo";

/// Deduplication key: `year-label`
pub fn dedup_key(record: &PaymentRecord) -> String {
    let label = record.label();
    let label = if label.is_empty() { MISSING_PERIOD_KEY } else { label };
    format!("{}-{}", record.year, label)
}

/// Collapse records declaring the same `(year, period)` to the first one seen.
///
/// Labels are trimmed; relative order of kept records is unchanged.
pub fn normalize(records: Vec<PaymentRecord>, concepts: &BenefitConcepts) -> Vec<PaymentRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut kept = Vec::with_capacity(records.len());

    for mut record in records {
        let key = dedup_key(&record);
        if !seen.insert(key.clone()) {
            debug!(
                "Discarding duplicate period {} (benefit amount {:.2})",
                key,
                concepts.benefit_amount(&record)
            );
            continue;
        }

        let label = match record.label() {
            "" => None,
            label => Some(label.to_string()),
        };
        record.period_label = label;
        kept.push(record);
    }

    kept
}
