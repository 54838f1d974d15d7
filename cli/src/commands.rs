pub mod options;
pub mod render;
pub mod summary;

use anyhow::{Context, Result};
use agrimap::{DashboardConfig, DataSource, Dataset, FilterSelection};
use tracing::info;

use crate::cli::{Cli, FilterArgs};

/// Configuration from `--config`, or the defaults.
pub fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    match &cli.config {
        Some(path) => DashboardConfig::from_file(path),
        None => Ok(DashboardConfig::default()),
    }
}

/// Load every configured data file from `location`.
pub fn load_dataset(location: &str, config: &DashboardConfig) -> Result<Dataset> {
    let source = DataSource::parse(location);
    info!("[load] reading datasets from {location}");
    Dataset::load(&source, config)
        .with_context(|| agrimap::StatusMessage::load_error(&config.data).text)
}

pub fn selection(filter: &FilterArgs) -> FilterSelection {
    FilterSelection::new(filter.areas.iter().cloned(), filter.commodities.iter().cloned())
}
