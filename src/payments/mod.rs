//! Payment history: records, benefit lookup, normalization and ordering

mod record;
pub mod normalizer;
pub mod sequencer;
pub mod loader;

pub use record::{PaymentRecord, LineItem, BenefitConcepts};
pub use normalizer::{normalize, dedup_key, MISSING_PERIOD_KEY};
pub use sequencer::{sequence, sequence_by_year, resolve_month, MonthResolution};
pub use loader::{
    BeneficiaryHistory, HistoryInput, load_input_from_path, load_input_from_reader,
    load_records_from_path, load_records_from_reader,
};
