//! Ley 4 de 1976 retroactive pension arrears engine
//!
//! Reconstructs a beneficiary's payment history, detects the drop that marks a
//! change of payer, projects what should have been paid under the statutory
//! reajuste and reconciles it against what was actually paid.

pub mod config;
pub mod detection;
pub mod engine;
pub mod error;
pub mod payments;
pub mod projection;
pub mod reconcile;
pub mod reference;
pub mod report;

pub use config::EngineConfig;
pub use engine::{ArrearsEngine, BeneficiaryReport};
pub use error::{ArrearsError, Result};
pub use payments::{BeneficiaryHistory, PaymentRecord, LineItem, BenefitConcepts};
pub use reference::{StatutoryRow, StatutoryTable};
pub use report::{ArrearsReport, Report, NoDataReason};
