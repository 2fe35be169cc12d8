use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One published contract notice, typed at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractNotice {
    /// CN ID, unique within a dataset.
    pub id: String,
    pub agency: String,
    pub supplier: String,
    pub category: String,
    /// Non-negative contract value, or None when the source cell was unusable.
    pub value: Option<Decimal>,
    pub publish_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: String,
}

impl ContractNotice {
    /// Value for summation: missing values count as zero.
    pub fn value_or_zero(&self) -> Decimal {
        self.value.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

impl Confidence {
    pub fn from_str_loose(s: &str) -> Option<Confidence> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Confidence::Low),
            "medium" | "med" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }
}

/// Resolved description of a business's services, produced upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencySpend {
    pub agency: String,
    pub total_value: Decimal,
    pub contract_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierSpend {
    pub supplier: String,
    pub total_value: Decimal,
    pub contract_count: usize,
}

/// A contract notice whose end date falls inside the expiry horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiringContract {
    pub id: String,
    pub agency: String,
    pub supplier: String,
    pub value: Option<Decimal>,
    pub end_date: NaiveDate,
    pub category: String,
    pub description: String,
}

/// Everything the presentation layer needs about a set of matched categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub matched_categories: Vec<String>,
    /// Total historical spend over the matched subset.
    pub total_spend: Decimal,
    pub contract_count: usize,
    pub top_agencies: Vec<AgencySpend>,
    pub top_suppliers: Vec<SupplierSpend>,
    /// Contracts ending within the configured horizon.
    pub expiring_count: usize,
    pub expiring_value: Decimal,
    /// Soonest-expiring contracts, earliest first.
    pub expiring_sample: Vec<ExpiringContract>,
}

impl InsightSummary {
    /// A summary with zero totals and empty lists.
    pub fn empty(matched_categories: Vec<String>) -> Self {
        Self {
            matched_categories,
            ..Self::default()
        }
    }
}
