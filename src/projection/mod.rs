//! Dual-index projection: statutory compounding alongside what was actually paid

mod paid;
mod projector;

pub use paid::{PaidYear, paid_years};
pub use projector::{
    ProjectedYear, compound_step, compound_series, continuation_start_value,
    project_statutory, project_continuation,
};

// ============================================================================
// Table Eras
// ============================================================================
// Table 1 covers the first year on record up to and including the transition
// year (payments before the drop). Table 3 starts at the transition year with
// the payments from the drop onward and runs to the end of the analysis.

/// Which side of the transition a projected year belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Era {
    PreTransition,
    PostTransition,
}
