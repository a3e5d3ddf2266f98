//! Statutory reference data: minimum wage, Ley 4 reajuste and prior-year IPC
//!
//! One row per calendar year. Missing years are a configuration defect and
//! surface as `ArrearsError::MissingReferenceData`.

pub mod loader;

pub use loader::{
    load_default_statutory_table, load_statutory_table, load_statutory_table_from_reader,
    DEFAULT_REFERENCE_PATH,
};

use crate::error::{ArrearsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference values for one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatutoryRow {
    pub year: i32,
    /// Monthly legal minimum wage (SMMLV)
    pub minimum_wage: f64,
    /// Year-over-year mandated increase applied to the projection (percent)
    pub statutory_adjustment_pct: f64,
    /// IPC of the previous year (percent)
    pub prior_year_inflation_pct: f64,
}

/// Year-indexed statutory table
#[derive(Debug, Clone)]
pub struct StatutoryTable {
    rows: BTreeMap<i32, StatutoryRow>,
}

impl StatutoryTable {
    /// Build from rows; later duplicates of a year are rejected
    pub fn from_rows(rows: Vec<StatutoryRow>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for row in rows {
            if row.minimum_wage <= 0.0 {
                return Err(ArrearsError::InvalidReferenceRow(format!(
                    "year {} has non-positive minimum wage {}",
                    row.year, row.minimum_wage
                )));
            }
            if map.insert(row.year, row).is_some() {
                return Err(ArrearsError::InvalidReferenceRow(format!(
                    "year {} appears more than once",
                    row.year
                )));
            }
        }
        Ok(Self { rows: map })
    }

    /// Colombian SMMLV, decreed increases and DANE IPC, 1999 onward
    pub fn default_colombia() -> Self {
        // (year, SMMLV, increase %, IPC of year - 1)
        const DATA: [(i32, f64, f64, f64); 28] = [
            (1999, 236_460.0, 16.01, 16.70),
            (2000, 260_100.0, 10.00, 9.23),
            (2001, 286_000.0, 9.96, 8.75),
            (2002, 309_000.0, 8.04, 7.65),
            (2003, 332_000.0, 7.44, 6.99),
            (2004, 358_000.0, 7.83, 6.49),
            (2005, 381_500.0, 6.56, 5.50),
            (2006, 408_000.0, 6.95, 4.85),
            (2007, 433_700.0, 6.30, 4.48),
            (2008, 461_500.0, 6.41, 5.69),
            (2009, 496_900.0, 7.67, 7.67),
            (2010, 515_000.0, 3.64, 2.00),
            (2011, 535_600.0, 4.00, 3.17),
            (2012, 566_700.0, 5.80, 3.73),
            (2013, 589_500.0, 4.02, 2.44),
            (2014, 616_000.0, 4.50, 1.94),
            (2015, 644_350.0, 4.60, 3.66),
            (2016, 689_455.0, 7.00, 6.77),
            (2017, 737_717.0, 7.00, 5.75),
            (2018, 781_242.0, 5.90, 4.09),
            (2019, 828_116.0, 6.00, 3.18),
            (2020, 877_803.0, 6.00, 3.80),
            (2021, 908_526.0, 3.50, 1.61),
            (2022, 1_000_000.0, 10.07, 5.62),
            (2023, 1_160_000.0, 16.00, 13.12),
            (2024, 1_300_000.0, 12.00, 9.28),
            (2025, 1_423_500.0, 9.54, 5.20),
            (2026, 1_750_905.0, 23.00, 5.10),
        ];

        let rows = DATA
            .iter()
            .map(|&(year, minimum_wage, statutory_adjustment_pct, prior_year_inflation_pct)| {
                (
                    year,
                    StatutoryRow {
                        year,
                        minimum_wage,
                        statutory_adjustment_pct,
                        prior_year_inflation_pct,
                    },
                )
            })
            .collect();

        Self { rows }
    }

    /// Row for a year, or `MissingReferenceData`
    pub fn row(&self, year: i32) -> Result<&StatutoryRow> {
        self.rows
            .get(&year)
            .ok_or(ArrearsError::MissingReferenceData { year })
    }

    /// Fail on the first year of `[first, last]` without a row
    pub fn ensure_covers(&self, first: i32, last: i32) -> Result<()> {
        (first..=last).try_for_each(|year| self.row(year).map(|_| ()))
    }

    pub fn first_year(&self) -> Option<i32> {
        self.rows.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.rows.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
