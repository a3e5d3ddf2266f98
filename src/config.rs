//! Engine configuration
//!
//! Loaded from JSON; every field has a default so `{}` is a valid config.

use crate::detection::DEFAULT_DROP_THRESHOLD_PCT;
use crate::error::{ArrearsError, Result};
use crate::payments::BenefitConcepts;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Percent fall between consecutive payments that counts as a drop
    #[serde(default = "default_drop_threshold")]
    pub drop_threshold_pct: f64,

    /// Last year of the analysis; current calendar year when absent
    #[serde(default)]
    pub end_year: Option<i32>,

    /// Payslip concepts identifying the pension and extra mesadas
    #[serde(default)]
    pub concepts: BenefitConcepts,
}

fn default_drop_threshold() -> f64 {
    DEFAULT_DROP_THRESHOLD_PCT
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drop_threshold_pct: DEFAULT_DROP_THRESHOLD_PCT,
            end_year: None,
            concepts: BenefitConcepts::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.drop_threshold_pct > 0.0 && self.drop_threshold_pct <= 100.0) {
            return Err(ArrearsError::InvalidConfig(format!(
                "drop threshold must be in (0, 100], got {}",
                self.drop_threshold_pct
            )));
        }
        if self.concepts.pension_name_marker.trim().is_empty() && self.concepts.pension_codes.is_empty() {
            return Err(ArrearsError::InvalidConfig(
                "no pension code or name marker configured".to_string(),
            ));
        }
        Ok(())
    }

    pub fn resolved_end_year(&self) -> i32 {
        self.end_year.unwrap_or_else(|| Local::now().year())
    }
}
