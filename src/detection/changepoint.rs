//! Per-year drop detection ("caída drástica")
//!
//! A year's payslips are folded through `DropScan::step`. The first valid
//! amount that falls more than the threshold below the previous valid amount
//! freezes the scan: neither that record nor any later one counts. Extra
//! mesadas on a payslip without a base amount only count once a valid payment
//! has been seen.

use crate::payments::{BenefitConcepts, PaymentRecord};

/// Drop (percent of the previous amount) above which a payment is anomalous
pub const DEFAULT_DROP_THRESHOLD_PCT: f64 = 50.0;

/// What the scan needs from one payslip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub amount: f64,
    /// Paid supplementary mesadas on the same payslip
    pub extra_payments: u32,
}

impl Observation {
    pub fn from_record(record: &PaymentRecord, concepts: &BenefitConcepts) -> Self {
        Self {
            amount: concepts.benefit_amount(record),
            extra_payments: concepts.extra_payments(record),
        }
    }
}

/// Accumulator of the drop scan
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DropScan {
    /// Payments that count toward arrears
    pub valid_count: u32,
    /// Last amount accepted before any drop
    pub last_valid_amount: Option<f64>,
    /// Index of the record that dropped
    pub first_drop_index: Option<usize>,
}

/// Percent fall from `previous` to `current`
pub fn drop_percent(previous: f64, current: f64) -> f64 {
    (previous - current) / previous * 100.0
}

impl DropScan {
    pub fn has_dropped(&self) -> bool {
        self.first_drop_index.is_some()
    }

    /// Fold one observation into the scan
    pub fn step(self, index: usize, obs: Observation, threshold_pct: f64) -> Self {
        if self.has_dropped() {
            return self;
        }

        if obs.amount <= 0.0 {
            if self.last_valid_amount.is_none() {
                return self;
            }
            return Self {
                valid_count: self.valid_count + obs.extra_payments,
                ..self
            };
        }

        match self.last_valid_amount {
            Some(previous) if drop_percent(previous, obs.amount) > threshold_pct => Self {
                first_drop_index: Some(index),
                ..self
            },
            _ => Self {
                valid_count: self.valid_count + 1 + obs.extra_payments,
                last_valid_amount: Some(obs.amount),
                first_drop_index: None,
            },
        }
    }
}

/// Scan a chronologically ordered slice of one year's records
pub fn detect_drops(
    ordered: &[PaymentRecord],
    concepts: &BenefitConcepts,
    threshold_pct: f64,
) -> DropScan {
    ordered
        .iter()
        .enumerate()
        .fold(DropScan::default(), |scan, (index, record)| {
            scan.step(index, Observation::from_record(record, concepts), threshold_pct)
        })
}
