use crate::dataset::Dataset;
use crate::model::{AgencySpend, ContractNotice, ExpiringContract, SupplierSpend};
use chrono::{Local, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Default ranking size for a standalone agency query.
pub const DEFAULT_AGENCY_TOP_N: usize = 8;
/// Default ranking size for a standalone supplier query.
pub const DEFAULT_SUPPLIER_TOP_N: usize = 5;
/// Default expiry horizon in months.
pub const DEFAULT_EXPIRY_MONTHS: u32 = 6;

/// Add up money amounts, saturating at `Decimal::MAX` instead of panicking.
pub fn sum_values<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(value))
}

/// Sum and count rows per key, ranked by total descending then key ascending.
///
/// Rows with a blank key are left out of the ranking.
pub(crate) fn rank_by<'a, F>(
    rows: &[&'a ContractNotice],
    key: F,
    top_n: usize,
) -> Vec<(String, Decimal, usize)>
where
    F: Fn(&'a ContractNotice) -> &'a str,
{
    let mut groups: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for &row in rows {
        let name = key(row);
        if name.trim().is_empty() {
            continue;
        }
        let entry = groups.entry(name).or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(row.value_or_zero());
        entry.1 += 1;
    }

    let mut ranked: Vec<(String, Decimal, usize)> = groups
        .into_iter()
        .map(|(name, (total, count))| (name.to_string(), total, count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked
}

/// Last day of the expiry window starting at `today`.
pub fn horizon_end(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

impl Dataset {
    /// Total spend and contract count per agency over the matched subset.
    pub fn spend_by_agency<S: AsRef<str>>(
        &self,
        categories: &[S],
        top_n: usize,
    ) -> Vec<AgencySpend> {
        let rows = self.matched(categories);
        rank_by(&rows, |n| n.agency.as_str(), top_n)
            .into_iter()
            .map(|(agency, total_value, contract_count)| AgencySpend {
                agency,
                total_value,
                contract_count,
            })
            .collect()
    }

    /// Total spend and contract count per supplier over the matched subset.
    ///
    /// With `agency_filter`, only rows whose agency contains the filter
    /// (case-insensitive) are ranked. A blank filter is ignored.
    pub fn top_suppliers<S: AsRef<str>>(
        &self,
        categories: &[S],
        agency_filter: Option<&str>,
        top_n: usize,
    ) -> Vec<SupplierSpend> {
        let mut rows = self.matched(categories);

        if let Some(filter) = agency_filter.map(str::trim).filter(|f| !f.is_empty()) {
            let filter = filter.to_lowercase();
            rows.retain(|n| n.agency.to_lowercase().contains(&filter));
        }

        rank_by(&rows, |n| n.supplier.as_str(), top_n)
            .into_iter()
            .map(|(supplier, total_value, contract_count)| SupplierSpend {
                supplier,
                total_value,
                contract_count,
            })
            .collect()
    }

    /// Contracts ending within `months` of today, soonest first.
    pub fn expiring_contracts<S: AsRef<str>>(
        &self,
        categories: &[S],
        months: u32,
    ) -> Vec<ExpiringContract> {
        self.expiring_contracts_at(categories, months, Local::now().date_naive())
    }

    /// Contracts whose end date lies in `[today, today + months]`, soonest first.
    ///
    /// Rows without an end date never qualify. Equal end dates are ordered by id.
    pub fn expiring_contracts_at<S: AsRef<str>>(
        &self,
        categories: &[S],
        months: u32,
        today: NaiveDate,
    ) -> Vec<ExpiringContract> {
        let cutoff = horizon_end(today, months);

        let mut expiring: Vec<ExpiringContract> = self
            .matched(categories)
            .into_iter()
            .filter_map(|n| {
                let end_date = n.end_date.filter(|d| *d >= today && *d <= cutoff)?;
                Some(ExpiringContract {
                    id: n.id.clone(),
                    agency: n.agency.clone(),
                    supplier: n.supplier.clone(),
                    value: n.value,
                    end_date,
                    category: n.category.clone(),
                    description: n.description.clone(),
                })
            })
            .collect();

        expiring.sort_by(|a, b| a.end_date.cmp(&b.end_date).then_with(|| a.id.cmp(&b.id)));
        expiring
    }
}
