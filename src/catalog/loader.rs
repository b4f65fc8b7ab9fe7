//! Dataset Loading
//!
//! One-shot load of the dataset collection, either from the fixture compiled
//! into the binary or from a JSON file of the same shape.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, warn};

use super::Catalog;
use crate::config::Config;
use crate::models::{DatasetCollection, DatasetRecord};
use crate::types::AppResult;

const BUNDLED_DATASETS: &str = include_str!("../../data/sample-data.json");

#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self) -> AppResult<DatasetCollection>;

    /// Human readable origin, used in logs
    fn describe(&self) -> String;
}

/// The fixture shipped inside the binary
pub struct BundledSource;

#[async_trait]
impl DatasetSource for BundledSource {
    async fn load(&self) -> AppResult<DatasetCollection> {
        parse_collection(BUNDLED_DATASETS)
    }

    fn describe(&self) -> String {
        "bundled sample data".to_string()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn load(&self) -> AppResult<DatasetCollection> {
        let content = fs::read_to_string(&self.path).await?;
        parse_collection(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    datasets: Vec<serde_json::Value>,
}

/// Parse a collection document. A record that fails to decode is skipped
/// with a warning; only a malformed document is an error.
pub fn parse_collection(content: &str) -> AppResult<DatasetCollection> {
    let raw: RawCollection = serde_json::from_str(content)?;
    let datasets = raw
        .datasets
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<DatasetRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping dataset at index {}: {}", index, e);
                None
            }
        })
        .collect();
    Ok(DatasetCollection { datasets })
}

pub fn source_from_config(config: &Config) -> Box<dyn DatasetSource> {
    match &config.data.path {
        Some(path) => Box::new(FileSource::new(path.clone())),
        None => Box::new(BundledSource),
    }
}

/// Load and dedupe; failures are logged before being returned
pub async fn load_catalog(source: &dyn DatasetSource) -> AppResult<Catalog> {
    let collection = source.load().await.map_err(|e| {
        error!("Error loading data from {}: {}", source.describe(), e);
        e
    })?;
    let records = dedupe_ids(collection.datasets);
    info!("Loaded {} datasets from {}", records.len(), source.describe());
    Ok(Catalog::new(records))
}

/// Load failures yield an empty catalog
pub async fn load_catalog_or_empty(source: &dyn DatasetSource) -> Catalog {
    load_catalog(source).await.unwrap_or_default()
}

/// Keep the first record for each id
fn dedupe_ids(records: Vec<DatasetRecord>) -> Vec<DatasetRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(record.id.clone());
            if !fresh {
                warn!("Duplicate dataset id {}, keeping first occurrence", record.id);
            }
            fresh
        })
        .collect()
}
