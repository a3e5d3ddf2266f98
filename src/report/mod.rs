//! Report assembly: Table 1 and Table 3 stitched into one continuous report

pub mod export;

pub use export::{write_rows_csv, CsvRow};

use crate::detection::TransitionPoint;
use crate::projection::Era;
use crate::reconcile::{CostSharing, ReconciledRow, ReconciledTable};
use serde::Serialize;

/// Why a report could not be produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NoDataReason {
    /// The history has no payslips at all
    NoRecords,
    /// The first year on record has no positive benefit amount
    NoStartingPayment { year: i32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub era: Era,
    /// First Table 3 row: only the payments after the drop
    pub partial_year: bool,
    #[serde(flatten)]
    pub row: ReconciledRow,
}

/// The transition and the split it implies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitInfo {
    pub transition: TransitionPoint,
    pub cost_sharing: CostSharing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrearsReport {
    pub start_year: i32,
    pub start_value: f64,
    pub rows: Vec<ReportRow>,
    pub pre_transition_total: f64,
    pub post_transition_total: f64,
    pub grand_total: f64,
    pub split: Option<SplitInfo>,
}

impl ArrearsReport {
    pub fn era_rows(&self, era: Era) -> impl Iterator<Item = &ReportRow> + '_ {
        self.rows.iter().filter(move |row| row.era == era)
    }

    pub fn end_year(&self) -> Option<i32> {
        self.rows.last().map(|row| row.row.projected.year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Report {
    Complete(ArrearsReport),
    NoData { reason: NoDataReason },
}

impl Report {
    pub fn as_complete(&self) -> Option<&ArrearsReport> {
        match self {
            Report::Complete(report) => Some(report),
            Report::NoData { .. } => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Report::NoData { .. })
    }
}

/// Stitch both tables.
///
/// `pre` carries the reason instead of a table when the starting projection
/// was undefined.
pub fn assemble(
    pre: Result<ReconciledTable, NoDataReason>,
    post: Option<ReconciledTable>,
    split: Option<SplitInfo>,
) -> Report {
    let pre = match pre {
        Ok(table) if !table.rows.is_empty() => table,
        Ok(_) => {
            return Report::NoData {
                reason: NoDataReason::NoRecords,
            }
        }
        Err(reason) => return Report::NoData { reason },
    };

    let start_year = pre.rows[0].projected.year;
    let start_value = pre.rows[0].projected.statutory_projection;
    let pre_transition_total = pre.total;
    let post_transition_total = post.as_ref().map(|table| table.total).unwrap_or(0.0);

    let pre_rows = pre.rows.into_iter().map(|row| ReportRow {
        era: Era::PreTransition,
        partial_year: false,
        row,
    });
    let post_rows = post
        .map(|table| table.rows)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, row)| ReportRow {
            era: Era::PostTransition,
            partial_year: i == 0,
            row,
        });

    Report::Complete(ArrearsReport {
        start_year,
        start_value,
        rows: pre_rows.chain(post_rows).collect(),
        pre_transition_total,
        post_transition_total,
        grand_total: pre_transition_total + post_transition_total,
        split,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectedYear;
    use crate::reconcile::reconcile;

    fn projected(year: i32, projection: f64, paid: f64, count: u32) -> ProjectedYear {
        ProjectedYear {
            year,
            minimum_wage: 1_000.0,
            statutory_adjustment_pct: 5.0,
            statutory_projection: projection,
            minimum_wage_multiple: 1.0,
            prior_year_inflation_pct: 3.0,
            last_valid_paid_amount: paid,
            minimum_wage_multiple_at_ipc: paid / 1_000.0,
            valid_payment_count: count,
        }
    }

    #[test]
    fn test_assemble_two_eras() {
        let pre = reconcile(&[projected(2011, 100.0, 90.0, 14), projected(2012, 105.0, 90.0, 8)]);
        let post = reconcile(&[projected(2012, 55.0, 40.0, 6), projected(2013, 57.75, 40.0, 14)]);

        let report = assemble(Ok(pre.clone()), Some(post.clone()), None);
        let report = report.as_complete().unwrap();

        let years: Vec<i32> = report.rows.iter().map(|r| r.row.projected.year).collect();
        assert_eq!(years, vec![2011, 2012, 2012, 2013]);
        assert_eq!(report.rows[1].era, Era::PreTransition);
        assert!(!report.rows[1].partial_year);
        assert_eq!(report.rows[2].era, Era::PostTransition);
        assert!(report.rows[2].partial_year);
        assert!(!report.rows[3].partial_year);
        assert_eq!(report.grand_total, pre.total + post.total);
        assert_eq!(report.era_rows(Era::PostTransition).count(), 2);
        assert_eq!(report.end_year(), Some(2013));
    }

    #[test]
    fn test_assemble_without_transition() {
        let pre = reconcile(&[projected(2011, 100.0, 90.0, 14)]);
        let report = assemble(Ok(pre), None, None);
        let report = report.as_complete().unwrap();
        assert_eq!(report.post_transition_total, 0.0);
        assert_eq!(report.grand_total, report.pre_transition_total);
        assert_eq!(report.start_value, 100.0);
    }

    #[test]
    fn test_undefined_projection_is_no_data() {
        let report = assemble(Err(NoDataReason::NoStartingPayment { year: 1999 }), None, None);
        assert_eq!(
            report,
            Report::NoData {
                reason: NoDataReason::NoStartingPayment { year: 1999 }
            }
        );
        assert!(assemble(Ok(reconcile(&[])), None, None).is_no_data());
    }

    #[test]
    fn test_complete_report_json_keys() {
        let pre = reconcile(&[projected(2013, 3_000_000.0, 2_607_761.0, 9)]);
        let post = reconcile(&[projected(2013, 1_406_574.0, 1_014_335.0, 5)]);
        let split = SplitInfo {
            transition: TransitionPoint {
                year: 2013,
                period_label: "1 sep. 2013 a 30 sep. 2013".to_string(),
                value_before_drop: 2_607_761.0,
                value_after_drop: 1_014_335.0,
                drop_percent: 61.1,
                remaining_payments_in_year: 5,
                index_in_year: 8,
            },
            cost_sharing: CostSharing::at_transition(3_000_000.0, 2_607_761.0, 1_014_335.0),
        };

        let json = serde_json::to_value(assemble(Ok(pre), Some(post), Some(split))).unwrap();
        assert_eq!(json["status"], "complete");

        let row = json["rows"][0].as_object().unwrap();
        for key in [
            "year",
            "minimumWage",
            "statutoryAdjustmentPercent",
            "statutoryProjection",
            "minimumWageMultiple",
            "priorYearInflationPercent",
            "lastValidPaidAmount",
            "minimumWageMultipleAtIPC",
            "shortfall",
            "validPaymentCount",
            "yearlyArrears",
            "era",
            "partialYear",
        ] {
            assert!(row.contains_key(key), "missing row key {}", key);
        }
        assert_eq!(row.len(), 13);
        assert_eq!(json["rows"][1]["era"], "postTransition");

        for key in ["preTransitionTotal", "postTransitionTotal", "grandTotal"] {
            assert!(json[key].is_number(), "missing total {}", key);
        }

        let cost_sharing = json["split"]["costSharing"].as_object().unwrap();
        for key in ["employerPortion", "fundPortion", "employerPercent", "fundPercent"] {
            assert!(cost_sharing.contains_key(key), "missing cost-sharing key {}", key);
        }
        assert_eq!(json["split"]["transition"]["valueAfterDrop"], 1_014_335.0);
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report::NoData {
            reason: NoDataReason::NoStartingPayment { year: 1999 },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "noData");
        assert_eq!(json["reason"]["kind"], "noStartingPayment");
        assert_eq!(json["reason"]["year"], 1999);
    }
}
