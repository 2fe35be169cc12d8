use crate::aggregate::sum_values;
use crate::config::InsightConfig;
use crate::dataset::Dataset;
use crate::model::InsightSummary;
use chrono::{Local, NaiveDate};

/// Default size of each ranking embedded in a summary.
pub const DEFAULT_SUMMARY_TOP_N: usize = 5;
/// Default number of expiring contracts kept as the summary sample.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

impl Dataset {
    /// Summarize the matched subset with the default limits and today's date.
    pub fn category_summary(&self, categories: &[String]) -> InsightSummary {
        let today = Local::now().date_naive();
        self.category_summary_with(categories, &InsightConfig::default(), today)
    }

    /// Summarize the matched subset: totals, rankings and upcoming expiries.
    ///
    /// An empty subset is a normal outcome and yields a zeroed summary.
    pub fn category_summary_with(
        &self,
        categories: &[String],
        config: &InsightConfig,
        today: NaiveDate,
    ) -> InsightSummary {
        let subset = self.matched(categories);
        if subset.is_empty() {
            return InsightSummary::empty(categories.to_vec());
        }

        // Rows with a blank agency or supplier still count here
        let total_spend = sum_values(subset.iter().map(|n| n.value_or_zero()));
        let contract_count = subset.len();

        let top_agencies = self.spend_by_agency(categories, config.summary_top_n);
        let top_suppliers = self.top_suppliers(categories, None, config.summary_top_n);

        let expiring = self.expiring_contracts_at(categories, config.expiry_months, today);
        let expiring_count = expiring.len();
        let expiring_value = sum_values(expiring.iter().filter_map(|c| c.value));
        let expiring_sample = expiring.into_iter().take(config.sample_size).collect();

        tracing::debug!(
            categories = categories.len(),
            contracts = contract_count,
            expiring = expiring_count,
            "built category summary"
        );

        InsightSummary {
            matched_categories: categories.to_vec(),
            total_spend,
            contract_count,
            top_agencies,
            top_suppliers,
            expiring_count,
            expiring_value,
            expiring_sample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContractNotice;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn notice(
        id: &str,
        agency: &str,
        value: Option<Decimal>,
        days_left: Option<i64>,
    ) -> ContractNotice {
        ContractNotice {
            id: id.into(),
            agency: agency.into(),
            supplier: format!("Supplier {id}"),
            category: "Computer services".into(),
            value,
            publish_date: None,
            end_date: days_left.map(|d| today() + chrono::Duration::days(d)),
            description: String::new(),
        }
    }

    #[test]
    fn test_empty_categories_zeroed() {
        let ds = Dataset::from_notices(vec![notice("1", "A", Some(dec!(10)), Some(1))]);
        let summary = ds.category_summary_with(&[], &InsightConfig::default(), today());
        assert_eq!(summary.contract_count, 0);
        assert_eq!(summary.total_spend, Decimal::ZERO);
        assert!(summary.top_agencies.is_empty());
        assert!(summary.top_suppliers.is_empty());
        assert_eq!(summary.expiring_count, 0);
        assert_eq!(summary.expiring_value, Decimal::ZERO);
        assert!(summary.expiring_sample.is_empty());
    }

    #[test]
    fn test_unknown_category_echoed_but_zeroed() {
        let ds = Dataset::from_notices(vec![notice("1", "A", Some(dec!(10)), Some(1))]);
        let categories = vec!["Catering".to_string()];
        let summary = ds.category_summary_with(&categories, &InsightConfig::default(), today());
        assert_eq!(summary.matched_categories, categories);
        assert_eq!(summary.contract_count, 0);
    }

    #[test]
    fn test_summary_totals_and_bounds() {
        let notices = (0..8)
            .map(|i| {
                notice(
                    &i.to_string(),
                    &format!("Agency {i}"),
                    Some(Decimal::from(100 * (i + 1))),
                    Some(10 * i),
                )
            })
            .chain([notice("x", "Agency 0", None, None)])
            .collect();
        let ds = Dataset::from_notices(notices);
        let categories = vec!["Computer services".to_string()];

        let summary = ds.category_summary_with(&categories, &InsightConfig::default(), today());

        assert_eq!(summary.contract_count, 9);
        assert_eq!(summary.total_spend, dec!(3600));
        assert_eq!(summary.top_agencies.len(), 5);
        assert_eq!(summary.top_agencies[0].agency, "Agency 7");
        assert_eq!(summary.top_suppliers.len(), 5);
        // every dated row ends within 70 days
        assert_eq!(summary.expiring_count, 8);
        assert_eq!(summary.expiring_value, dec!(3600));
        assert_eq!(summary.expiring_sample.len(), 5);
        assert_eq!(summary.expiring_sample[0].id, "0");
        assert!(summary
            .expiring_sample
            .windows(2)
            .all(|w| w[0].end_date <= w[1].end_date));
    }

    #[test]
    fn test_config_limits_respected() {
        let ds = Dataset::from_notices(vec![
            notice("1", "A", Some(dec!(10)), Some(5)),
            notice("2", "B", Some(dec!(20)), Some(60)),
        ]);
        let config = InsightConfig {
            summary_top_n: 1,
            expiry_months: 1,
            sample_size: 1,
            ..InsightConfig::default()
        };
        let categories = vec!["Computer services".to_string()];
        let summary = ds.category_summary_with(&categories, &config, today());
        assert_eq!(summary.top_agencies.len(), 1);
        assert_eq!(summary.top_agencies[0].agency, "B");
        assert_eq!(summary.expiring_count, 1);
        assert_eq!(summary.expiring_value, dec!(10));
    }

    #[test]
    fn test_blank_agency_counted_but_not_ranked() {
        let ds = Dataset::from_notices(vec![
            notice("1", "", Some(dec!(500)), Some(3)),
            notice("2", "Agency A", Some(dec!(100)), None),
        ]);
        let categories = vec!["Computer services".to_string()];
        let summary = ds.category_summary_with(&categories, &InsightConfig::default(), today());
        assert_eq!(summary.contract_count, 2);
        assert_eq!(summary.total_spend, dec!(600));
        assert_eq!(summary.top_agencies.len(), 1);
        assert_eq!(summary.top_agencies[0].agency, "Agency A");
        assert_eq!(summary.expiring_value, dec!(500));
    }

    #[test]
    fn test_huge_values_saturate() {
        let ds = Dataset::from_notices(vec![
            notice("1", "A", Some(Decimal::MAX), Some(1)),
            notice("2", "A", Some(dec!(1)), Some(2)),
        ]);
        let categories = vec!["Computer services".to_string()];
        let summary = ds.category_summary_with(&categories, &InsightConfig::default(), today());
        assert_eq!(summary.total_spend, Decimal::MAX);
        assert_eq!(summary.expiring_value, Decimal::MAX);
        assert_eq!(summary.top_agencies[0].total_value, Decimal::MAX);
    }
}
