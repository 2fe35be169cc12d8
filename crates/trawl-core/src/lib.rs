pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod etl;
pub mod matching;
pub mod model;
pub mod parsing;
pub mod profile;
pub mod stats;
pub mod store;
pub mod summary;

use chrono::NaiveDate;
use config::InsightConfig;
use dataset::Dataset;
use model::{CapabilityProfile, InsightSummary};
use serde::{Deserialize, Serialize};

/// Categories resolved from a keyword list, plus the summary over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInsights {
    pub categories: Vec<String>,
    pub summary: InsightSummary,
}

impl CategoryInsights {
    /// False when nothing in the dataset could be mapped to the keywords.
    pub fn has_matches(&self) -> bool {
        !self.categories.is_empty() && self.summary.contract_count > 0
    }
}

/// Main API entry point: map keywords to categories and summarize them.
///
/// Never fails: keywords that match nothing produce an empty summary.
pub fn insights_for_keywords<S: AsRef<str>>(
    dataset: &Dataset,
    keywords: &[S],
    config: &InsightConfig,
    today: NaiveDate,
) -> CategoryInsights {
    let categories = dataset.match_categories(keywords);
    let summary = dataset.category_summary_with(&categories, config, today);
    CategoryInsights {
        categories,
        summary,
    }
}

/// Same as [`insights_for_keywords`], reading keywords from a resolved profile.
pub fn insights_for_profile(
    dataset: &Dataset,
    profile: &CapabilityProfile,
    config: &InsightConfig,
    today: NaiveDate,
) -> CategoryInsights {
    tracing::debug!(
        keywords = profile.keywords.len(),
        confidence = %profile.confidence,
        "resolving capability profile"
    );
    insights_for_keywords(dataset, &profile.keywords, config, today)
}
