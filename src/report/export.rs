//! CSV export of report rows, one line per era row

use super::{ArrearsReport, ReportRow};
use crate::error::Result;
use crate::projection::Era;
use serde::Serialize;
use std::io::Write;

/// Flat row layout for spreadsheets
#[derive(Debug, Clone, Serialize)]
pub struct CsvRow<'a> {
    pub beneficiary_id: &'a str,
    pub era: &'static str,
    pub partial_year: bool,
    pub year: i32,
    pub minimum_wage: f64,
    pub statutory_adjustment_pct: f64,
    pub statutory_projection: f64,
    pub minimum_wage_multiple: f64,
    pub prior_year_inflation_pct: f64,
    pub last_valid_paid_amount: f64,
    pub minimum_wage_multiple_at_ipc: f64,
    pub shortfall: f64,
    pub valid_payment_count: u32,
    pub yearly_arrears: f64,
}

impl<'a> CsvRow<'a> {
    pub fn new(beneficiary_id: &'a str, row: &ReportRow) -> Self {
        let p = &row.row.projected;
        Self {
            beneficiary_id,
            era: match row.era {
                Era::PreTransition => "table1",
                Era::PostTransition => "table3",
            },
            partial_year: row.partial_year,
            year: p.year,
            minimum_wage: p.minimum_wage,
            statutory_adjustment_pct: p.statutory_adjustment_pct,
            statutory_projection: round2(p.statutory_projection),
            minimum_wage_multiple: round4(p.minimum_wage_multiple),
            prior_year_inflation_pct: p.prior_year_inflation_pct,
            last_valid_paid_amount: round2(p.last_valid_paid_amount),
            minimum_wage_multiple_at_ipc: round4(p.minimum_wage_multiple_at_ipc),
            shortfall: round2(row.row.shortfall),
            valid_payment_count: p.valid_payment_count,
            yearly_arrears: round2(row.row.yearly_arrears),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Write the rows of each `(beneficiary_id, report)` pair under one header
pub fn write_rows_csv<W: Write>(writer: W, reports: &[(&str, &ArrearsReport)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (beneficiary_id, report) in reports {
        for row in &report.rows {
            wtr.serialize(CsvRow::new(beneficiary_id, row))?;
        }
    }
    wtr.flush()?;
    Ok(())
}
