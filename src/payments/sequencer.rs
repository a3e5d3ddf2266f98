//! Calendar ordering of a year's payslips from Spanish month names

use super::PaymentRecord;
use log::debug;
use std::collections::BTreeMap;

/// Month names and abbreviations found in period labels
const MONTH_NAMES: [(&str, u32); 27] = [
    ("enero", 1),
    ("ene", 1),
    ("febrero", 2),
    ("feb", 2),
    ("marzo", 3),
    ("mar", 3),
    ("abril", 4),
    ("abr", 4),
    ("mayo", 5),
    ("may", 5),
    ("junio", 6),
    ("jun", 6),
    ("julio", 7),
    ("jul", 7),
    ("agosto", 8),
    ("ago", 8),
    ("septiembre", 9),
    ("setiembre", 9),
    ("sept", 9),
    ("sep", 9),
    ("set", 9),
    ("octubre", 10),
    ("oct", 10),
    ("noviembre", 11),
    ("nov", 11),
    ("diciembre", 12),
    ("dic", 12),
];

/// Outcome of reading a month out of a period label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthResolution {
    Resolved(u32),
    /// No month name found; sorts as January
    DefaultedToJanuary,
}

impl MonthResolution {
    pub fn month(self) -> u32 {
        match self {
            MonthResolution::Resolved(m) => m,
            MonthResolution::DefaultedToJanuary => 1,
        }
    }

    pub fn is_defaulted(self) -> bool {
        matches!(self, MonthResolution::DefaultedToJanuary)
    }
}

/// First month name appearing in the label, as a whole word
pub fn resolve_month(label: &str) -> MonthResolution {
    let lower = label.to_lowercase();
    lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .find_map(|word| {
            MONTH_NAMES
                .iter()
                .find(|(name, _)| *name == word)
                .map(|(_, month)| MonthResolution::Resolved(*month))
        })
        .unwrap_or(MonthResolution::DefaultedToJanuary)
}

/// Stable sort of one year's records by resolved month
pub fn sequence(year_records: Vec<PaymentRecord>) -> Vec<PaymentRecord> {
    let mut keyed: Vec<(u32, PaymentRecord)> = year_records
        .into_iter()
        .map(|record| {
            let resolution = resolve_month(record.label());
            if resolution.is_defaulted() {
                debug!(
                    "Period label {:?} ({}) has no month name, ordering as January",
                    record.label(),
                    record.year
                );
            }
            (resolution.month(), record)
        })
        .collect();

    keyed.sort_by_key(|(month, _)| *month);
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Group records by year (ascending) and sequence each year
pub fn sequence_by_year(records: Vec<PaymentRecord>) -> BTreeMap<i32, Vec<PaymentRecord>> {
    let mut by_year: BTreeMap<i32, Vec<PaymentRecord>> = BTreeMap::new();
    for record in records {
        by_year.entry(record.year).or_default().push(record);
    }

    by_year
        .into_iter()
        .map(|(year, recs)| (year, sequence(recs)))
        .collect()
}
