//! Changepoint detection: per-year caps and the beneficiary-wide transition

pub mod changepoint;
pub mod transition;

pub use changepoint::{
    detect_drops, drop_percent, DropScan, Observation, DEFAULT_DROP_THRESHOLD_PCT,
};
pub use transition::{find_transition, TransitionPoint};
