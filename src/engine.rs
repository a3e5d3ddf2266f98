//! Arrears engine: runs one beneficiary through the whole pipeline
//!
//! normalize → sequence per year → transition scan → Table 1 projection →
//! Table 3 continuation → reconciliation → assembly.

use crate::config::EngineConfig;
use crate::detection::{detect_drops, find_transition, TransitionPoint};
use crate::error::{ArrearsError, Result};
use crate::payments::{normalize, sequence_by_year, BeneficiaryHistory, PaymentRecord};
use crate::projection::{paid_years, project_continuation, project_statutory, PaidYear};
use crate::reconcile::{reconcile, CostSharing};
use crate::reference::StatutoryTable;
use crate::report::{assemble, NoDataReason, Report, SplitInfo};
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Result of one beneficiary in a batch run
#[derive(Debug)]
pub struct BeneficiaryReport {
    pub beneficiary_id: String,
    pub outcome: Result<Report>,
}

#[derive(Debug, Clone)]
pub struct ArrearsEngine {
    table: StatutoryTable,
    config: EngineConfig,
}

impl ArrearsEngine {
    pub fn new(table: StatutoryTable, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { table, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &StatutoryTable {
        &self.table
    }

    /// Generate the arrears report of one beneficiary
    pub fn generate(&self, records: Vec<PaymentRecord>) -> Result<Report> {
        let concepts = &self.config.concepts;
        let threshold = self.config.drop_threshold_pct;

        let normalized = normalize(records, concepts);
        let by_year = sequence_by_year(normalized);

        let (start_year, first_year_records) = match by_year.iter().next() {
            Some((&year, records)) => (year, records),
            None => {
                warn!("No payment records; nothing to project");
                return Ok(Report::NoData {
                    reason: NoDataReason::NoRecords,
                });
            }
        };

        let end_year = self.config.resolved_end_year();
        if end_year < start_year {
            return Err(ArrearsError::InvalidConfig(format!(
                "end year {} precedes first payment year {}",
                end_year, start_year
            )));
        }
        self.table.ensure_covers(start_year, end_year)?;

        let start_value = first_year_records
            .iter()
            .map(|record| concepts.benefit_amount(record))
            .find(|amount| *amount > 0.0);
        let start_value = match start_value {
            Some(value) => value,
            None => {
                warn!("First year {} has no positive benefit amount", start_year);
                return Ok(assemble(
                    Err(NoDataReason::NoStartingPayment { year: start_year }),
                    None,
                    None,
                ));
            }
        };

        let in_range: BTreeMap<i32, Vec<PaymentRecord>> = by_year
            .into_iter()
            .filter(|(year, _)| *year <= end_year)
            .collect();

        let transition = find_transition(&in_range, concepts, threshold);
        let pre_end = transition.as_ref().map(|t| t.year).unwrap_or(end_year);

        let pre_paid = self.pre_transition_paid(&in_range, start_year, pre_end, transition.as_ref());
        let pre_projection =
            match project_statutory(start_year, start_value, pre_end, &pre_paid, &self.table)? {
                Some(rows) => rows,
                None => {
                    return Ok(assemble(
                        Err(NoDataReason::NoStartingPayment { year: start_year }),
                        None,
                        None,
                    ))
                }
            };
        let pre_table = reconcile(&pre_projection);

        let Some(transition) = transition else {
            debug!("No transition; single table {}-{}", start_year, end_year);
            return Ok(assemble(Ok(pre_table), None, None));
        };

        let final_pre = match pre_projection.last() {
            Some(row) => *row,
            None => return Ok(assemble(Ok(pre_table), None, None)),
        };

        let post_paid = self.post_transition_paid(&in_range, &transition, end_year);
        let post_projection =
            project_continuation(&final_pre, &transition, end_year, &post_paid, &self.table)?;
        let post_table = reconcile(&post_projection);

        let cost_sharing = CostSharing::at_transition(
            final_pre.statutory_projection,
            transition.value_before_drop,
            transition.value_after_drop,
        );

        Ok(assemble(
            Ok(pre_table),
            Some(post_table),
            Some(SplitInfo {
                transition,
                cost_sharing,
            }),
        ))
    }

    /// Table 1 paid amounts; the transition year only counts records before the drop
    fn pre_transition_paid(
        &self,
        by_year: &BTreeMap<i32, Vec<PaymentRecord>>,
        start_year: i32,
        pre_end: i32,
        transition: Option<&TransitionPoint>,
    ) -> BTreeMap<i32, PaidYear> {
        let concepts = &self.config.concepts;
        let threshold = self.config.drop_threshold_pct;
        let mut paid = paid_years(by_year, start_year, pre_end, concepts, threshold);

        if let Some(t) = transition {
            if let Some(records) = by_year.get(&t.year) {
                let before = &records[..t.index_in_year];
                let scan = detect_drops(before, concepts, threshold);
                paid.insert(t.year, PaidYear::from_scan(t.year, &scan, t.value_before_drop));
            }
        }

        paid
    }

    /// Table 3 paid amounts; the transition year starts at the dropped record
    fn post_transition_paid(
        &self,
        by_year: &BTreeMap<i32, Vec<PaymentRecord>>,
        transition: &TransitionPoint,
        end_year: i32,
    ) -> BTreeMap<i32, PaidYear> {
        let concepts = &self.config.concepts;
        let threshold = self.config.drop_threshold_pct;
        let mut paid = paid_years(by_year, transition.year + 1, end_year, concepts, threshold);

        if let Some(records) = by_year.get(&transition.year) {
            let after = &records[transition.index_in_year..];
            paid.insert(
                transition.year,
                PaidYear::scan(transition.year, after, concepts, threshold),
            );
        }

        paid
    }

    /// Generate reports for many beneficiaries in parallel, keeping input order
    pub fn generate_batch(&self, histories: &[BeneficiaryHistory]) -> Vec<BeneficiaryReport> {
        histories
            .par_iter()
            .map(|history| BeneficiaryReport {
                beneficiary_id: history.beneficiary_id.clone(),
                outcome: self.generate(history.records.clone()),
            })
            .collect()
    }
}
