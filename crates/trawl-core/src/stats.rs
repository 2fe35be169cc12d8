use crate::aggregate::{horizon_end, rank_by, sum_values, DEFAULT_EXPIRY_MONTHS};
use crate::dataset::Dataset;
use crate::model::AgencySpend;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const TOP_AGENCIES: usize = 5;

/// Whole-dataset overview, printed after a load or a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub rows: usize,
    pub total_value: Decimal,
    /// Mean over rows with a value; None when no row has one.
    pub mean_value: Option<Decimal>,
    pub median_value: Option<Decimal>,
    pub unique_agencies: usize,
    pub unique_categories: usize,
    pub unique_suppliers: usize,
    pub first_published: Option<NaiveDate>,
    pub last_published: Option<NaiveDate>,
    pub top_agencies: Vec<AgencySpend>,
    pub expiring_count: usize,
    pub expiring_value: Decimal,
}

impl Dataset {
    pub fn stats(&self, today: NaiveDate) -> DatasetStats {
        let notices = self.notices();

        let mut values: Vec<Decimal> = notices.iter().filter_map(|n| n.value).collect();
        values.sort();
        let total_value = sum_values(values.iter().copied());
        let mean_value = (!values.is_empty())
            .then(|| (total_value / Decimal::from(values.len())).round_dp(2));
        let median_value = median(&values);

        let published = notices.iter().filter_map(|n| n.publish_date);
        let first_published = published.clone().min();
        let last_published = published.max();

        let rows: Vec<_> = notices.iter().collect();
        let top_agencies = rank_by(&rows, |n| n.agency.as_str(), TOP_AGENCIES)
            .into_iter()
            .map(|(agency, total_value, contract_count)| AgencySpend {
                agency,
                total_value,
                contract_count,
            })
            .collect();

        let cutoff = horizon_end(today, DEFAULT_EXPIRY_MONTHS);
        let expiring: Vec<_> = notices
            .iter()
            .filter(|n| n.end_date.is_some_and(|d| d >= today && d <= cutoff))
            .collect();

        DatasetStats {
            rows: notices.len(),
            total_value,
            mean_value,
            median_value,
            unique_agencies: count_distinct(notices.iter().map(|n| n.agency.as_str())),
            unique_categories: self.categories().len(),
            unique_suppliers: count_distinct(notices.iter().map(|n| n.supplier.as_str())),
            first_published,
            last_published,
            top_agencies,
            expiring_count: expiring.len(),
            expiring_value: sum_values(expiring.iter().map(|n| n.value_or_zero())),
        }
    }
}

fn count_distinct<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.filter(|s| !s.is_empty()).collect::<HashSet<_>>().len()
}

/// Median of an already sorted slice.
fn median(sorted: &[Decimal]) -> Option<Decimal> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => {
            let (low, high) = (sorted[n / 2 - 1], sorted[n / 2]);
            Some(low + (high - low) / Decimal::TWO)
        }
    }
}
