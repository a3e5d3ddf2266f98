//! What was actually paid per year, after the changepoint cap

use crate::detection::{detect_drops, DropScan};
use crate::payments::{BenefitConcepts, PaymentRecord};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidYear {
    pub year: i32,
    pub last_valid_paid_amount: f64,
    pub valid_payment_count: u32,
}

impl PaidYear {
    /// A year with no payslips at all
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            last_valid_paid_amount: 0.0,
            valid_payment_count: 0,
        }
    }

    /// Use `fallback_amount` when the scan accepted no payment
    pub fn from_scan(year: i32, scan: &DropScan, fallback_amount: f64) -> Self {
        Self {
            year,
            last_valid_paid_amount: scan.last_valid_amount.unwrap_or(fallback_amount),
            valid_payment_count: scan.valid_count,
        }
    }

    /// Scan one year's sequenced records.
    ///
    /// With no valid payment the first record's amount stands in, floored at
    /// zero so reversals never count as paid; in practice that is 0.
    pub fn scan(
        year: i32,
        ordered: &[PaymentRecord],
        concepts: &BenefitConcepts,
        threshold_pct: f64,
    ) -> Self {
        let scan = detect_drops(ordered, concepts, threshold_pct);
        let fallback = ordered
            .first()
            .map(|record| concepts.benefit_amount(record))
            .unwrap_or(0.0)
            .max(0.0);
        Self::from_scan(year, &scan, fallback)
    }
}

/// Paid summary for every year in `[first, last]` present in `by_year`
pub fn paid_years(
    by_year: &BTreeMap<i32, Vec<PaymentRecord>>,
    first: i32,
    last: i32,
    concepts: &BenefitConcepts,
    threshold_pct: f64,
) -> BTreeMap<i32, PaidYear> {
    if first > last {
        return BTreeMap::new();
    }
    by_year
        .range(first..=last)
        .map(|(&year, records)| (year, PaidYear::scan(year, records, concepts, threshold_pct)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::{sequence_by_year, LineItem};

    fn rec(year: i32, label: &str, amount: f64) -> PaymentRecord {
        PaymentRecord::new(year, label, vec![LineItem::new("", "Mesada", amount, 0.0)])
    }

    #[test]
    fn test_zero_valid_year_pays_nothing() {
        let concepts = BenefitConcepts::default();
        let records = vec![
            PaymentRecord::new(2003, "ene", vec![LineItem::new("", "Retroactivo", 10.0, 0.0)]),
            rec(2003, "feb", 0.0),
        ];
        let paid = PaidYear::scan(2003, &records, &concepts, 50.0);
        assert_eq!(paid.valid_payment_count, 0);
        assert_eq!(paid.last_valid_paid_amount, 0.0);

        // Reversed mesada
        let records = vec![rec(2003, "ene", -250_000.0), rec(2003, "feb", 0.0)];
        let paid = PaidYear::scan(2003, &records, &concepts, 50.0);
        assert_eq!(paid.valid_payment_count, 0);
        assert_eq!(paid.last_valid_paid_amount, 0.0);

        let scan = DropScan::default();
        assert_eq!(PaidYear::from_scan(2003, &scan, 77.0).last_valid_paid_amount, 77.0);
    }

    #[test]
    fn test_paid_years_range() {
        let concepts = BenefitConcepts::default();
        let by_year = sequence_by_year(vec![
            rec(1999, "ene", 100.0),
            rec(1999, "feb", 100.0),
            rec(2000, "ene", 110.0),
            rec(2001, "ene", 120.0),
        ]);
        let paid = paid_years(&by_year, 1999, 2000, &concepts, 50.0);
        assert_eq!(paid.len(), 2);
        assert_eq!(paid[&1999].valid_payment_count, 2);
        assert_eq!(paid[&2000].last_valid_paid_amount, 110.0);
    }
}
