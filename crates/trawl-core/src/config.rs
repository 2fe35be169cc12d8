use crate::aggregate::{DEFAULT_AGENCY_TOP_N, DEFAULT_EXPIRY_MONTHS, DEFAULT_SUPPLIER_TOP_N};
use crate::error::TrawlError;
use crate::summary::{DEFAULT_SAMPLE_SIZE, DEFAULT_SUMMARY_TOP_N};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the dataset location.
pub const DATA_PATH_ENV: &str = "TRAWL_DATA";

/// Dataset location used when neither config nor environment name one.
pub const DEFAULT_DATA_PATH: &str = "data/cn_combined.csv";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub insights: InsightConfig,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DataConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Limits and horizons applied by the aggregation queries and summarizer.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InsightConfig {
    /// Rows returned by a standalone agency ranking.
    #[serde(default = "default_agency_top_n")]
    pub agency_top_n: usize,
    /// Rows returned by a standalone supplier ranking.
    #[serde(default = "default_supplier_top_n")]
    pub supplier_top_n: usize,
    /// Rows in each ranking embedded in a summary.
    #[serde(default = "default_summary_top_n")]
    pub summary_top_n: usize,
    #[serde(default = "default_expiry_months")]
    pub expiry_months: u32,
    /// Expiring contracts kept as the summary sample.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            agency_top_n: default_agency_top_n(),
            supplier_top_n: default_supplier_top_n(),
            summary_top_n: default_summary_top_n(),
            expiry_months: default_expiry_months(),
            sample_size: default_sample_size(),
        }
    }
}

fn default_agency_top_n() -> usize {
    DEFAULT_AGENCY_TOP_N
}
fn default_supplier_top_n() -> usize {
    DEFAULT_SUPPLIER_TOP_N
}
fn default_summary_top_n() -> usize {
    DEFAULT_SUMMARY_TOP_N
}
fn default_expiry_months() -> u32 {
    DEFAULT_EXPIRY_MONTHS
}
fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

impl Config {
    /// Dataset path: explicit config entry, then `TRAWL_DATA`, then the default.
    pub fn data_path(&self) -> PathBuf {
        self.data.path.clone().unwrap_or_else(default_data_path)
    }
}

/// Dataset path from `TRAWL_DATA`, falling back to `data/cn_combined.csv`.
pub fn default_data_path() -> PathBuf {
    std::env::var_os(DATA_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Load a config from a TOML file.
pub fn load_config(path: &Path) -> Result<Config, TrawlError> {
    let content = std::fs::read_to_string(path).map_err(|e| TrawlError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a TOML string.
pub fn parse_config(toml_str: &str, source: &Path) -> Result<Config, TrawlError> {
    let config: Config = toml::from_str(toml_str).map_err(|e| TrawlError::Config {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config).map_err(|reason| TrawlError::Config {
        path: source.to_path_buf(),
        reason,
    })?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<(), String> {
    let insights = &config.insights;
    if insights.agency_top_n == 0 || insights.supplier_top_n == 0 || insights.summary_top_n == 0
    {
        return Err("ranking sizes must be at least 1".into());
    }
    if insights.expiry_months == 0 {
        return Err("expiry_months must be at least 1".into());
    }
    Ok(())
}
