use crate::error::TrawlError;
use crate::model::ContractNotice;
use crate::parsing::{parse_currency, parse_date};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

/// Column headers of the cleaned contract-notice snapshot.
pub mod columns {
    pub const ID: &str = "CN ID";
    pub const AGENCY: &str = "Agency";
    pub const SUPPLIER: &str = "Supplier Name";
    pub const CATEGORY: &str = "Category";
    pub const VALUE: &str = "Value";
    pub const PUBLISH_DATE: &str = "Publish Date";
    pub const START_DATE: &str = "Start Date";
    pub const END_DATE: &str = "End Date";
    pub const AMENDMENT_PUBLISH_DATE: &str = "Amendment Publish Date";
    pub const DESCRIPTION: &str = "Description";
}

/// Positions of the typed columns in a snapshot's header row.
/// Missing columns read as empty cells; unknown columns are ignored.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    id: Option<usize>,
    agency: Option<usize>,
    supplier: Option<usize>,
    category: Option<usize>,
    value: Option<usize>,
    publish_date: Option<usize>,
    end_date: Option<usize>,
    description: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h == name);
        Self {
            id: position(columns::ID),
            agency: position(columns::AGENCY),
            supplier: position(columns::SUPPLIER),
            category: position(columns::CATEGORY),
            value: position(columns::VALUE),
            publish_date: position(columns::PUBLISH_DATE),
            end_date: position(columns::END_DATE),
            description: position(columns::DESCRIPTION),
        }
    }

    /// Type one row. Rows without an identifier are unusable.
    fn notice(&self, record: &csv::StringRecord) -> Option<ContractNotice> {
        let cell = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("").trim();

        let id = cell(self.id);
        if id.is_empty() {
            return None;
        }
        Some(ContractNotice {
            id: id.to_string(),
            agency: cell(self.agency).to_string(),
            supplier: cell(self.supplier).to_string(),
            category: cell(self.category).to_string(),
            value: parse_currency(cell(self.value)),
            publish_date: parse_date(cell(self.publish_date)),
            end_date: parse_date(cell(self.end_date)),
            description: cell(self.description).to_string(),
        })
    }
}

/// Rows dropped while reading a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SkippedRows {
    /// Rows with an empty identifier cell.
    missing_id: usize,
    /// Rows the CSV reader rejected, e.g. invalid UTF-8.
    unreadable: usize,
}

/// Type every readable row, counting the ones left behind.
fn read_rows<R: Read>(reader: R) -> Result<(Vec<ContractNotice>, SkippedRows), TrawlError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let column_map = ColumnMap::from_headers(csv_reader.headers()?);

    let mut notices = Vec::new();
    let mut skipped = SkippedRows::default();
    for record in csv_reader.records() {
        match record {
            Ok(record) => match column_map.notice(&record) {
                Some(notice) => notices.push(notice),
                None => skipped.missing_id += 1,
            },
            Err(e) => {
                tracing::debug!(error = %e, "unreadable contract row");
                skipped.unreadable += 1;
            }
        }
    }
    Ok((notices, skipped))
}

/// Immutable in-memory snapshot of historical contract notices.
#[derive(Debug, Clone)]
pub struct Dataset {
    notices: Vec<ContractNotice>,
    /// Distinct non-empty category labels, sorted.
    categories: Vec<String>,
}

impl Dataset {
    /// Build a dataset from typed notices, keeping the last row for each id.
    pub fn from_notices(notices: Vec<ContractNotice>) -> Self {
        let notices = dedup_keep_last(notices, |n| n.id.as_str());
        let categories: BTreeSet<&str> = notices
            .iter()
            .map(|n| n.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        let categories = categories.into_iter().map(str::to_string).collect();
        Self {
            notices,
            categories,
        }
    }

    /// Read and type a cleaned CSV snapshot from disk.
    ///
    /// A missing file or a file without a single usable row is fatal: the
    /// caller cannot answer any query without the snapshot.
    pub fn from_path(path: &Path) -> Result<Self, TrawlError> {
        if !path.is_file() {
            return Err(TrawlError::DatasetMissing {
                path: path.to_path_buf(),
            });
        }
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        if dataset.is_empty() {
            return Err(TrawlError::EmptyDataset {
                path: path.to_path_buf(),
            });
        }
        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            categories = dataset.categories.len(),
            "loaded contract dataset"
        );
        Ok(dataset)
    }

    /// Read and type CSV rows from any reader. Unusable rows are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TrawlError> {
        let (notices, skipped) = read_rows(reader)?;

        if skipped.missing_id > 0 {
            tracing::warn!(
                skipped = skipped.missing_id,
                "skipped contract rows without an identifier"
            );
        }
        if skipped.unreadable > 0 {
            tracing::warn!(
                skipped = skipped.unreadable,
                "skipped contract rows the CSV reader could not decode"
            );
        }

        Ok(Self::from_notices(notices))
    }

    pub fn notices(&self) -> &[ContractNotice] {
        &self.notices
    }

    /// Distinct category labels present in the dataset, sorted ascending.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Rows whose category is a member of `categories`, in dataset order.
    pub fn matched<S: AsRef<str>>(&self, categories: &[S]) -> Vec<&ContractNotice> {
        if categories.is_empty() {
            return Vec::new();
        }
        let wanted: HashSet<&str> = categories.iter().map(|c| c.as_ref()).collect();
        self.notices
            .iter()
            .filter(|n| wanted.contains(n.category.as_str()))
            .collect()
    }
}

/// Drop every row that is followed by a later row with the same key.
///
/// Survivors keep their original relative order.
pub(crate) fn dedup_keep_last<T, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut last_index: HashMap<&str, usize> = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        last_index.insert(key(row), i);
    }
    let keep: Vec<bool> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| last_index.get(key(row)) == Some(&i))
        .collect();
    drop(last_index);

    rows.into_iter()
        .zip(keep)
        .filter_map(|(row, keep)| keep.then_some(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CSV: &str = "\
CN ID,Agency,Supplier Name,Category,Value,Publish Date,End Date,Description,Procurement Method
CN1, Agency A ,Acme,Computer services,100,2024-01-02,2026-01-31,Laptops,Open
CN2,Agency B,Bolt,Cleaning services,\"$2,500.50\",03/02/2024,,Floors,Limited
CN3,Agency A,Acme,Computer services,N/A,bad date,2026-03-01,Support,Open
,Agency C,Nobody,Catering,5,2024-01-01,2025-01-01,No id,Open
";

    #[test]
    fn test_from_reader_types_fields() {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.notices()[0];
        assert_eq!(first.agency, "Agency A");
        assert_eq!(first.value, Some(dec!(100)));
        assert_eq!(
            first.end_date,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 31)
        );

        let third = &ds.notices()[2];
        assert_eq!(third.value, None);
        assert_eq!(third.publish_date, None);
    }

    #[test]
    fn test_quoted_currency_is_parsed() {
        let csv = "CN ID,Category,Value\nCN9,Catering,\"$1,234,567.00\"\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.notices()[0].value, Some(dec!(1234567)));
    }

    #[test]
    fn test_categories_distinct_and_sorted() {
        let ds = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(ds.categories(), &["Cleaning services", "Computer services"]);
    }

    #[test]
    fn test_columns_found_by_header_name() {
        let csv = "Description,Value,Category,CN ID,Supplier Name,Agency\n\
                   Laptops,10,Computer services,CN7,Acme,Agency A\n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        let notice = &ds.notices()[0];
        assert_eq!(notice.id, "CN7");
        assert_eq!(notice.agency, "Agency A");
        assert_eq!(notice.supplier, "Acme");
        assert_eq!(notice.category, "Computer services");
        assert_eq!(notice.value, Some(dec!(10)));
        assert_eq!(notice.description, "Laptops");
        assert_eq!(notice.end_date, None);
    }

    #[test]
    fn test_skipped_rows_counted_by_cause() {
        let mut bytes = b"CN ID,Agency,Category\nCN1,A,C\n,B,C\n".to_vec();
        bytes.extend_from_slice(b"CN2,\xff\xfe,C\n");
        bytes.extend_from_slice(b"CN3,D,C\n");

        let (notices, skipped) = read_rows(bytes.as_slice()).unwrap();
        let ids: Vec<&str> = notices.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["CN1", "CN3"]);
        assert_eq!(
            skipped,
            SkippedRows {
                missing_id: 1,
                unreadable: 1
            }
        );

        let ds = Dataset::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_dedup_keeps_last_occurrence() {
        let rows = vec![("a", 1), ("b", 2), ("a", 3), ("c", 4)];
        let kept = dedup_keep_last(rows, |r| r.0);
        assert_eq!(kept, vec![("b", 2), ("a", 3), ("c", 4)]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = Dataset::from_path(Path::new("/nonexistent/cn_combined.csv")).unwrap_err();
        assert!(matches!(err, TrawlError::DatasetMissing { .. }));
    }

    #[test]
    fn test_header_only_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cn.csv");
        std::fs::write(&path, "CN ID,Agency,Category,Value\n").unwrap();
        let err = Dataset::from_path(&path).unwrap_err();
        assert!(matches!(err, TrawlError::EmptyDataset { .. }));
    }
}
