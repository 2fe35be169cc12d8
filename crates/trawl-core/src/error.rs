use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TrawlError {
    #[error("contract dataset not found at {path}. Run `trawl clean` on a combined export first")]
    DatasetMissing { path: PathBuf },

    #[error("contract dataset at {path} has no usable rows")]
    EmptyDataset { path: PathBuf },

    #[error("failed to load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
