//! CSV loader for the statutory table
//!
//! Expected header: `year,minimum_wage,statutory_adjustment_pct,prior_year_inflation_pct`

use super::{StatutoryRow, StatutoryTable};
use crate::error::Result;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default location of the bundled reference table
pub const DEFAULT_REFERENCE_PATH: &str = "data/reference/statutory_table.csv";

pub fn load_statutory_table_from_reader<R: Read>(reader: R) -> Result<StatutoryTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: StatutoryRow = result?;
        rows.push(row);
    }

    StatutoryTable::from_rows(rows)
}

pub fn load_statutory_table(path: &Path) -> Result<StatutoryTable> {
    let file = File::open(path)?;
    let table = load_statutory_table_from_reader(file)?;
    info!(
        "Loaded {} statutory rows from {} ({:?}-{:?})",
        table.len(),
        path.display(),
        table.first_year(),
        table.last_year()
    );
    Ok(table)
}

/// Load the table from `DEFAULT_REFERENCE_PATH` when it exists relative to the
/// working directory, else use the embedded Colombian table
pub fn load_default_statutory_table() -> Result<StatutoryTable> {
    let path = Path::new(DEFAULT_REFERENCE_PATH);
    if path.exists() {
        load_statutory_table(path)
    } else {
        info!("{} not found; using the embedded statutory table", path.display());
        Ok(StatutoryTable::default_colombia())
    }
}
