//! Catalog Store
//!
//! Holds the dataset collection loaded at startup and answers the read-only
//! queries behind every screen: counts per category, the popular ranking,
//! per-category listings and lookup by id.

pub mod category;
pub mod display;
pub mod loader;
pub mod query;

pub use category::Category;
pub use loader::{
    load_catalog, load_catalog_or_empty, parse_collection, source_from_config, BundledSource,
    DatasetSource, FileSource,
};
pub use query::{CategorySummary, RankingField};

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{DatasetId, DatasetRecord};

/// Immutable, cheaply cloneable view of the loaded collection
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Arc<[DatasetRecord]>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Catalog {
    pub fn new(records: Vec<DatasetRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn counts_by_category(&self) -> HashMap<String, usize> {
        query::counts_by_category(&self.records)
    }

    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        query::category_summaries(&self.records)
    }

    pub fn top_by_popularity(&self, field: RankingField, n: usize) -> Vec<&DatasetRecord> {
        query::top_by_popularity(&self.records, field, n)
    }

    pub fn filter_by(&self, category: Category) -> Vec<&DatasetRecord> {
        query::filter_by(&self.records, category)
    }

    pub fn filter_by_category(&self, label: &str) -> Vec<&DatasetRecord> {
        query::filter_by_category(&self.records, label)
    }

    pub fn find_by_id(&self, id: &DatasetId) -> Option<&DatasetRecord> {
        query::find_by_id(&self.records, id)
    }

    /// Lookup by user-supplied text, e.g. a CLI argument
    pub fn find_by_key(&self, raw: &str) -> Option<&DatasetRecord> {
        self.records.iter().find(|record| record.id.matches(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, content_type: &str) -> DatasetRecord {
        DatasetRecord {
            id: DatasetId::Number(id),
            name: format!("dataset-{}", id),
            provider: String::new(),
            content_type: content_type.to_string(),
            last_update: String::new(),
            data_stats: None,
            licensing: Default::default(),
        }
    }

    #[test]
    fn test_catalog_clones_share_records() {
        let catalog = Catalog::new(vec![record(1, "新聞"), record(2, "雜誌")]);
        let clone = catalog.clone();

        assert!(std::ptr::eq(catalog.records(), clone.records()));
        assert_eq!(clone.filter_by(Category::Magazine).len(), 1);
    }

    #[test]
    fn test_find_by_key() {
        let catalog = Catalog::new(vec![record(41, "新聞")]);
        assert!(catalog.find_by_key("41").is_some());
        assert!(catalog.find_by_key("42").is_none());
    }

    #[test]
    fn test_default_catalog_is_empty() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.top_by_popularity(RankingField::ArticleCount, 3).is_empty());
        assert!(catalog.category_summaries().iter().all(|s| s.count == 0));
    }
}
