//! Arrears reconciliation: statutory projection against what was paid
//!
//! Shortfalls may be negative (overpayment against the statutory line) and are
//! never clamped. Years without valid payments contribute no arrears.

use crate::projection::ProjectedYear;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledRow {
    #[serde(flatten)]
    pub projected: ProjectedYear,
    pub shortfall: f64,
    pub yearly_arrears: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledTable {
    pub rows: Vec<ReconciledRow>,
    pub total: f64,
}

impl ReconciledTable {
    pub fn last(&self) -> Option<&ReconciledRow> {
        self.rows.last()
    }
}

/// Employer / pension fund split of the pension at the transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSharing {
    pub employer_portion: f64,
    pub fund_portion: f64,
    pub employer_percent: f64,
    pub fund_percent: f64,
}

impl CostSharing {
    pub fn at_transition(
        final_pre_projection: f64,
        final_pre_paid: f64,
        first_post_drop_paid: f64,
    ) -> Self {
        let employer_portion = (final_pre_projection - final_pre_paid) + first_post_drop_paid;
        let fund_portion = final_pre_projection - employer_portion;

        let (employer_percent, fund_percent) = if final_pre_projection > 0.0 {
            (
                employer_portion / final_pre_projection * 100.0,
                fund_portion / final_pre_projection * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            employer_portion,
            fund_portion,
            employer_percent,
            fund_percent,
        }
    }
}

pub fn shortfall(projected: &ProjectedYear) -> f64 {
    projected.statutory_projection - projected.last_valid_paid_amount
}

/// `shortfall × count`, zero when the year has no valid payments
pub fn yearly_arrears(shortfall: f64, valid_payment_count: u32) -> f64 {
    if valid_payment_count == 0 {
        return 0.0;
    }
    shortfall * f64::from(valid_payment_count)
}

pub fn reconcile_year(projected: &ProjectedYear) -> ReconciledRow {
    let shortfall = shortfall(projected);
    ReconciledRow {
        projected: *projected,
        shortfall,
        yearly_arrears: yearly_arrears(shortfall, projected.valid_payment_count),
    }
}

pub fn reconcile(projected: &[ProjectedYear]) -> ReconciledTable {
    let rows: Vec<ReconciledRow> = projected.iter().map(reconcile_year).collect();
    let total = rows.iter().map(|row| row.yearly_arrears).sum();
    ReconciledTable { rows, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn year(year: i32, projection: f64, paid: f64, count: u32) -> ProjectedYear {
        ProjectedYear {
            year,
            minimum_wage: 260_100.0,
            statutory_adjustment_pct: 10.0,
            statutory_projection: projection,
            minimum_wage_multiple: 6.19,
            prior_year_inflation_pct: 9.23,
            last_valid_paid_amount: paid,
            minimum_wage_multiple_at_ipc: paid / 260_100.0,
            valid_payment_count: count,
        }
    }

    #[test]
    fn test_reference_year_2000() {
        let row = reconcile_year(&year(2000, 1_770_628.2, 1_758_234.0, 14));
        assert_relative_eq!(row.shortfall, 12_394.2, epsilon = 1e-6);
        assert_relative_eq!(row.yearly_arrears, 173_518.8, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_count_forces_zero_arrears() {
        let row = reconcile_year(&year(2001, 2_000_000.0, 1_000_000.0, 0));
        assert_relative_eq!(row.shortfall, 1_000_000.0);
        assert_eq!(row.yearly_arrears, 0.0);
        assert_eq!(yearly_arrears(-50.0, 0), 0.0);
    }

    #[test]
    fn test_negative_shortfall_is_kept() {
        let row = reconcile_year(&year(2002, 1_000.0, 1_100.0, 12));
        assert_relative_eq!(row.shortfall, -100.0);
        assert_relative_eq!(row.yearly_arrears, -1_200.0);
    }

    #[test]
    fn test_table_total() {
        let table = reconcile(&[
            year(2000, 110.0, 100.0, 14),
            year(2001, 121.0, 100.0, 14),
            year(2002, 133.1, 100.0, 0),
        ]);
        assert_eq!(table.rows.len(), 3);
        assert_relative_eq!(table.total, 140.0 + 294.0, epsilon = 1e-9);
        assert!(reconcile(&[]).total == 0.0);
    }

    #[test]
    fn test_cost_sharing() {
        let split = CostSharing::at_transition(3_000_000.0, 2_607_761.0, 1_014_335.0);
        assert_relative_eq!(split.employer_portion, 1_406_574.0);
        assert_relative_eq!(split.fund_portion, 1_593_426.0);
        assert_relative_eq!(split.employer_percent + split.fund_percent, 100.0, epsilon = 1e-9);
        assert_relative_eq!(split.employer_percent, 46.8858, epsilon = 1e-4);
    }

    #[test]
    fn test_cost_sharing_degenerate_projection() {
        let split = CostSharing::at_transition(0.0, 0.0, 10.0);
        assert_eq!(split.employer_percent, 0.0);
        assert_eq!(split.fund_percent, 0.0);
    }
}
