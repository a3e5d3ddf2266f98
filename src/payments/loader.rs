//! JSON loading of payment histories
//!
//! Accepts either a bare array of payslip records (one beneficiary) or an
//! array of `{ "beneficiaryId": ..., "records": [...] }` objects. An empty
//! array is one beneficiary without payslips.

use super::PaymentRecord;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Payment history of a single beneficiary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryHistory {
    #[serde(alias = "beneficiario", alias = "id")]
    pub beneficiary_id: String,
    pub records: Vec<PaymentRecord>,
}

/// Either shape of the history file
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryInput {
    Single(Vec<PaymentRecord>),
    Batch(Vec<BeneficiaryHistory>),
}

impl HistoryInput {
    /// Flatten into beneficiary histories; a single history gets `default_id`
    pub fn into_histories(self, default_id: &str) -> Vec<BeneficiaryHistory> {
        match self {
            HistoryInput::Batch(histories) => histories,
            HistoryInput::Single(records) => vec![BeneficiaryHistory {
                beneficiary_id: default_id.to_string(),
                records,
            }],
        }
    }
}

/// The shape is picked from the first element so that a malformed file
/// reports the offending field of that shape
pub fn load_input_from_reader<R: Read>(reader: R) -> Result<HistoryInput> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let is_batch = value
        .as_array()
        .and_then(|items| items.first())
        .map(|first| first.get("records").is_some())
        .unwrap_or(false);

    if is_batch {
        Ok(HistoryInput::Batch(serde_json::from_value(value)?))
    } else {
        Ok(HistoryInput::Single(serde_json::from_value(value)?))
    }
}

pub fn load_input_from_path(path: &Path) -> Result<HistoryInput> {
    let file = File::open(path)?;
    load_input_from_reader(BufReader::new(file))
}

/// Load a single beneficiary's records
pub fn load_records_from_reader<R: Read>(reader: R) -> Result<Vec<PaymentRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_records_from_path(path: &Path) -> Result<Vec<PaymentRecord>> {
    let file = File::open(path)?;
    load_records_from_reader(BufReader::new(file))
}
