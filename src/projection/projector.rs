//! Statutory compounding of the pension under Ley 4 de 1976
//!
//! The projection starts from a verified payment and grows each year by the
//! decreed minimum wage increase, independently of what was actually paid.

use super::PaidYear;
use crate::detection::TransitionPoint;
use crate::error::Result;
use crate::reference::StatutoryTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// One year of an era table before reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedYear {
    pub year: i32,
    pub minimum_wage: f64,
    #[serde(rename = "statutoryAdjustmentPercent")]
    pub statutory_adjustment_pct: f64,
    /// What should have been paid
    pub statutory_projection: f64,
    /// Projection in minimum wages, fixed at the table's first row
    pub minimum_wage_multiple: f64,
    #[serde(rename = "priorYearInflationPercent")]
    pub prior_year_inflation_pct: f64,
    pub last_valid_paid_amount: f64,
    /// Paid amount in minimum wages of the same year
    #[serde(rename = "minimumWageMultipleAtIPC")]
    pub minimum_wage_multiple_at_ipc: f64,
    pub valid_payment_count: u32,
}

/// `previous × (1 + pct / 100)`
pub fn compound_step(previous: f64, adjustment_pct: f64) -> f64 {
    previous * (1.0 + adjustment_pct / 100.0)
}

/// `(year, projection)` for every year of `[start_year, end_year]`
pub fn compound_series(
    start_year: i32,
    end_year: i32,
    start_value: f64,
    table: &StatutoryTable,
) -> Result<Vec<(i32, f64)>> {
    table.row(start_year)?;

    (start_year + 1..=end_year).try_fold(
        vec![(start_year, start_value)],
        |mut series, year| -> Result<Vec<(i32, f64)>> {
            let previous = series.last().map(|&(_, value)| value).unwrap_or(start_value);
            let row = table.row(year)?;
            series.push((year, compound_step(previous, row.statutory_adjustment_pct)));
            Ok(series)
        },
    )
}

/// Base of the post-transition table: accumulated gap plus the reduced payment
pub fn continuation_start_value(
    final_pre_projection: f64,
    final_pre_paid: f64,
    first_post_drop_paid: f64,
) -> f64 {
    (final_pre_projection - final_pre_paid) + first_post_drop_paid
}

fn project_era(
    start_year: i32,
    end_year: i32,
    start_value: f64,
    paid: &BTreeMap<i32, PaidYear>,
    table: &StatutoryTable,
) -> Result<Vec<ProjectedYear>> {
    let series = compound_series(start_year, end_year, start_value, table)?;
    let first_multiple = start_value / table.row(start_year)?.minimum_wage;

    series
        .into_iter()
        .map(|(year, projection)| {
            let row = table.row(year)?;
            let paid_year = paid.get(&year).copied().unwrap_or_else(|| PaidYear::empty(year));
            Ok(ProjectedYear {
                year,
                minimum_wage: row.minimum_wage,
                statutory_adjustment_pct: row.statutory_adjustment_pct,
                statutory_projection: projection,
                minimum_wage_multiple: first_multiple,
                prior_year_inflation_pct: row.prior_year_inflation_pct,
                last_valid_paid_amount: paid_year.last_valid_paid_amount,
                minimum_wage_multiple_at_ipc: paid_year.last_valid_paid_amount / row.minimum_wage,
                valid_payment_count: paid_year.valid_payment_count,
            })
        })
        .collect()
}

/// Table 1 projection.
///
/// `Ok(None)` when `start_value` is not a positive payment: the projection is
/// undefined rather than compounded from zero.
pub fn project_statutory(
    start_year: i32,
    start_value: f64,
    end_year: i32,
    paid: &BTreeMap<i32, PaidYear>,
    table: &StatutoryTable,
) -> Result<Option<Vec<ProjectedYear>>> {
    if start_value <= 0.0 {
        return Ok(None);
    }
    project_era(start_year, end_year, start_value, paid, table).map(Some)
}

/// Table 3 projection, continuing from the last Table 1 row
pub fn project_continuation(
    final_pre: &ProjectedYear,
    transition: &TransitionPoint,
    end_year: i32,
    paid: &BTreeMap<i32, PaidYear>,
    table: &StatutoryTable,
) -> Result<Vec<ProjectedYear>> {
    let start_value = continuation_start_value(
        final_pre.statutory_projection,
        transition.value_before_drop,
        transition.value_after_drop,
    );
    project_era(transition.year, end_year, start_value, paid, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArrearsError;
    use crate::reference::StatutoryRow;
    use approx::assert_relative_eq;

    fn flat_table(first: i32, last: i32, pct: f64) -> StatutoryTable {
        let rows = (first..=last)
            .map(|year| StatutoryRow {
                year,
                minimum_wage: 100_000.0 + (year - first) as f64 * 5_000.0,
                statutory_adjustment_pct: pct,
                prior_year_inflation_pct: 3.0,
            })
            .collect();
        StatutoryTable::from_rows(rows).unwrap()
    }

    #[test]
    fn test_first_step_from_1999() {
        let table = StatutoryTable::default_colombia();
        let series = compound_series(1999, 2000, 1_609_662.0, &table).unwrap();
        assert_eq!(series[0], (1999, 1_609_662.0));
        assert_eq!(series[1].0, 2000);
        assert_relative_eq!(series[1].1, 1_770_628.2, epsilon = 1e-6);
    }

    #[test]
    fn test_constant_rate_matches_closed_form() {
        let table = flat_table(2000, 2030, 4.5);
        let series = compound_series(2000, 2030, 1_000_000.0, &table).unwrap();
        for (year, value) in series {
            let expected = 1_000_000.0 * 1.045_f64.powi(year - 2000);
            assert_relative_eq!(value, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_missing_year_propagates() {
        let table = flat_table(2000, 2004, 5.0);
        let err = compound_series(2000, 2006, 1.0, &table).unwrap_err();
        assert!(matches!(err, ArrearsError::MissingReferenceData { year: 2005 }));
    }

    #[test]
    fn test_minimum_wage_multiple_is_fixed_at_first_row() {
        let table = flat_table(2000, 2003, 10.0);
        let rows = project_statutory(2000, 200_000.0, 2003, &BTreeMap::new(), &table)
            .unwrap()
            .unwrap();

        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_relative_eq!(row.minimum_wage_multiple, 2.0);
        }
        // recomputing would give 266_200 / 115_000
        assert!((rows[3].statutory_projection / rows[3].minimum_wage - 2.0).abs() > 0.1);
    }

    #[test]
    fn test_ipc_multiple_uses_paid_amount() {
        let table = flat_table(2000, 2001, 10.0);
        let mut paid = BTreeMap::new();
        paid.insert(
            2001,
            PaidYear {
                year: 2001,
                last_valid_paid_amount: 210_000.0,
                valid_payment_count: 14,
            },
        );
        let rows = project_statutory(2000, 200_000.0, 2001, &paid, &table)
            .unwrap()
            .unwrap();
        assert_eq!(rows[0].valid_payment_count, 0);
        assert_eq!(rows[0].last_valid_paid_amount, 0.0);
        assert_relative_eq!(rows[1].minimum_wage_multiple_at_ipc, 2.0);
        assert_eq!(rows[1].valid_payment_count, 14);
    }

    #[test]
    fn test_non_positive_start_is_undefined() {
        let table = flat_table(2000, 2001, 10.0);
        assert!(project_statutory(2000, 0.0, 2001, &BTreeMap::new(), &table)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_continuation_base() {
        assert_relative_eq!(
            continuation_start_value(3_000_000.0, 2_607_761.0, 1_014_335.0),
            1_406_574.0
        );

        let table = flat_table(2012, 2015, 5.0);
        let final_pre = ProjectedYear {
            year: 2013,
            minimum_wage: 105_000.0,
            statutory_adjustment_pct: 5.0,
            statutory_projection: 3_000_000.0,
            minimum_wage_multiple: 1.0,
            prior_year_inflation_pct: 3.0,
            last_valid_paid_amount: 2_607_761.0,
            minimum_wage_multiple_at_ipc: 1.0,
            valid_payment_count: 8,
        };
        let transition = TransitionPoint {
            year: 2013,
            period_label: "sep".to_string(),
            value_before_drop: 2_607_761.0,
            value_after_drop: 1_014_335.0,
            drop_percent: 61.1,
            remaining_payments_in_year: 4,
            index_in_year: 8,
        };

        let rows = project_continuation(&final_pre, &transition, 2015, &BTreeMap::new(), &table)
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_relative_eq!(rows[0].statutory_projection, 1_406_574.0);
        assert_relative_eq!(rows[2].statutory_projection, 1_406_574.0 * 1.05 * 1.05, max_relative = 1e-12);
    }
}
