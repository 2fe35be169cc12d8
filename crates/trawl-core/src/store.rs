use crate::config::default_data_path;
use crate::dataset::Dataset;
use crate::error::TrawlError;
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

static DATASET: OnceLock<Dataset> = OnceLock::new();

/// Serializes the first load so concurrent callers never read the file twice.
static LOAD_LOCK: Mutex<()> = Mutex::new(());

/// Get the process-wide dataset, loading it from the default path on first use.
///
/// The default path is `TRAWL_DATA` if set, else `data/cn_combined.csv`.
pub fn load() -> Result<&'static Dataset, TrawlError> {
    if let Some(dataset) = DATASET.get() {
        return Ok(dataset);
    }
    load_from(&default_data_path())
}

/// Get the process-wide dataset, loading it from `path` on first use.
///
/// The first successful load wins: once cached, later calls return the same
/// instance whatever path they pass. A failed load caches nothing.
pub fn load_from(path: &Path) -> Result<&'static Dataset, TrawlError> {
    if let Some(dataset) = DATASET.get() {
        return Ok(dataset);
    }

    let _guard = LOAD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(dataset) = DATASET.get() {
        return Ok(dataset);
    }

    let dataset = Dataset::from_path(path)?;
    Ok(DATASET.get_or_init(|| dataset))
}

/// The cached dataset, if a load has already succeeded.
pub fn cached() -> Option<&'static Dataset> {
    DATASET.get()
}
