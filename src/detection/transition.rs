//! Beneficiary-wide transition point
//!
//! The drop rule applied to the whole history in year order, without resetting
//! the previous amount at year boundaries. The first firing marks the moment
//! the benefit moved to a different payer.

use super::changepoint::{detect_drops, drop_percent};
use crate::payments::{BenefitConcepts, PaymentRecord};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::ControlFlow;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionPoint {
    pub year: i32,
    pub period_label: String,
    pub value_before_drop: f64,
    pub value_after_drop: f64,
    pub drop_percent: f64,
    /// Payments of the transition year from the dropped record onward
    pub remaining_payments_in_year: u32,
    /// Position of the dropped record within its sequenced year
    pub index_in_year: usize,
}

struct DropSite {
    year: i32,
    index: usize,
    before: f64,
    after: f64,
    pct: f64,
}

/// Locate the first drop across all years (ascending, each year sequenced)
pub fn find_transition(
    by_year: &BTreeMap<i32, Vec<PaymentRecord>>,
    concepts: &BenefitConcepts,
    threshold_pct: f64,
) -> Option<TransitionPoint> {
    let flow = by_year
        .iter()
        .flat_map(|(year, records)| {
            records
                .iter()
                .enumerate()
                .map(move |(index, record)| (*year, index, record))
        })
        .try_fold(None::<f64>, |previous, (year, index, record)| {
            let amount = concepts.benefit_amount(record);
            if amount <= 0.0 {
                return ControlFlow::Continue(previous);
            }
            match previous {
                Some(before) if drop_percent(before, amount) > threshold_pct => {
                    ControlFlow::Break(DropSite {
                        year,
                        index,
                        before,
                        after: amount,
                        pct: drop_percent(before, amount),
                    })
                }
                _ => ControlFlow::Continue(Some(amount)),
            }
        });

    let site = match flow {
        ControlFlow::Break(site) => site,
        ControlFlow::Continue(_) => return None,
    };

    let year_records = by_year.get(&site.year)?;
    let remaining = detect_drops(&year_records[site.index..], concepts, threshold_pct);
    let transition = TransitionPoint {
        year: site.year,
        period_label: year_records[site.index].label().to_string(),
        value_before_drop: site.before,
        value_after_drop: site.after,
        drop_percent: site.pct,
        remaining_payments_in_year: remaining.valid_count,
        index_in_year: site.index,
    };

    info!(
        "Transition detected in {} ({}): {:.2} -> {:.2} ({:.1}% drop)",
        transition.year,
        transition.period_label,
        transition.value_before_drop,
        transition.value_after_drop,
        transition.drop_percent
    );

    Some(transition)
}
