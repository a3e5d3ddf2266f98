//! Payslip records as delivered by the payment history source

use serde::{Deserialize, Deserializer, Serialize};

/// One line of a payslip: an income or deduction concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "codigo", alias = "code", default, deserialize_with = "string_or_number")]
    pub code: String,

    #[serde(rename = "nombre", alias = "name", default)]
    pub name: String,

    #[serde(rename = "ingresos", alias = "incomeAmount", default)]
    pub income_amount: f64,

    #[serde(rename = "egresos", alias = "expenseAmount", default)]
    pub expense_amount: f64,
}

impl LineItem {
    pub fn new(code: &str, name: &str, income_amount: f64, expense_amount: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            income_amount,
            expense_amount,
        }
    }
}

/// One disbursement period of a beneficiary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub year: i32,

    /// Free-text pay period, e.g. "16 ago. 2013 a 31 ago. 2013"
    #[serde(
        rename = "periodoPago",
        alias = "periodPago",
        alias = "periodLabel",
        default
    )]
    pub period_label: Option<String>,

    #[serde(rename = "detalle", alias = "lineItems", default)]
    pub line_items: Vec<LineItem>,
}

impl PaymentRecord {
    pub fn new(year: i32, period_label: &str, line_items: Vec<LineItem>) -> Self {
        Self {
            year,
            period_label: Some(period_label.to_string()),
            line_items,
        }
    }

    /// Trimmed period label, empty when absent
    pub fn label(&self) -> &str {
        self.period_label.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Which payslip concepts count as the monthly pension and as extra mesadas.
///
/// Lookup priority is code first, then name substring. Name matching is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitConcepts {
    /// Codes of the core monthly pension concept
    #[serde(default)]
    pub pension_codes: Vec<String>,

    /// Substring identifying the core pension concept by name
    #[serde(default = "default_pension_marker")]
    pub pension_name_marker: String,

    /// Codes of supplementary (13th/14th month style) mesadas
    #[serde(default)]
    pub extra_codes: Vec<String>,

    /// Substrings identifying supplementary mesadas by name
    #[serde(default = "default_extra_markers")]
    pub extra_name_markers: Vec<String>,
}

fn default_pension_marker() -> String {
    "mesada".to_string()
}

fn default_extra_markers() -> Vec<String> {
    vec![
        "mesada adicional".to_string(),
        "mesada extra".to_string(),
        "mesada 13".to_string(),
        "mesada 14".to_string(),
    ]
}

impl Default for BenefitConcepts {
    fn default() -> Self {
        Self {
            pension_codes: Vec::new(),
            pension_name_marker: default_pension_marker(),
            extra_codes: Vec::new(),
            extra_name_markers: default_extra_markers(),
        }
    }
}

impl BenefitConcepts {
    fn code_in(code: &str, codes: &[String]) -> bool {
        let code = code.trim();
        !code.is_empty() && codes.iter().any(|c| c.trim().eq_ignore_ascii_case(code))
    }

    /// Whether the item is a supplementary mesada
    pub fn is_extra(&self, item: &LineItem) -> bool {
        if Self::code_in(&item.code, &self.extra_codes) {
            return true;
        }
        let name = item.name.to_lowercase();
        self.extra_name_markers
            .iter()
            .any(|m| name.contains(&m.to_lowercase()))
    }

    /// The line carrying the core monthly pension, if any
    pub fn benefit_line<'a>(&self, record: &'a PaymentRecord) -> Option<&'a LineItem> {
        if let Some(item) = record
            .line_items
            .iter()
            .find(|item| Self::code_in(&item.code, &self.pension_codes))
        {
            return Some(item);
        }

        let marker = self.pension_name_marker.to_lowercase();
        record.line_items.iter().find(|item| {
            item.name.to_lowercase().contains(&marker) && !self.is_extra(item)
        })
    }

    /// Benefit amount of a record; 0 when no pension line is present
    pub fn benefit_amount(&self, record: &PaymentRecord) -> f64 {
        self.benefit_line(record)
            .map(|item| item.income_amount)
            .unwrap_or(0.0)
    }

    /// Number of paid supplementary mesadas on the record
    pub fn extra_payments(&self, record: &PaymentRecord) -> u32 {
        record
            .line_items
            .iter()
            .filter(|item| item.income_amount > 0.0 && self.is_extra(item))
            .count() as u32
    }
}

/// Scanned payslips carry codes both as strings and as bare numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
        Raw::Null => String::new(),
    })
}
