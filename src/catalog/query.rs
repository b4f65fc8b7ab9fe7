//! Catalog Queries
//!
//! Pure aggregation and filtering over a slice of dataset records.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;

use super::category::Category;
use crate::models::{DatasetId, DatasetRecord};

/// Numeric statistic used to rank datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingField {
    #[default]
    ArticleCount,
    WordCount,
    BookCount,
}

impl RankingField {
    pub fn value(self, record: &DatasetRecord) -> Option<u64> {
        match self {
            RankingField::ArticleCount => record.article_count(),
            RankingField::WordCount => record.word_count(),
            RankingField::BookCount => record.book_count(),
        }
    }
}

/// Count per UI category, as shown on the home screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub title: &'static str,
    pub count: usize,
}

/// Number of records per distinct `contentType` value
pub fn counts_by_category(records: &[DatasetRecord]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.content_type.clone()).or_insert(0) += 1;
    }
    counts
}

/// The four UI categories in display order, missing ones counted as zero
pub fn category_summaries(records: &[DatasetRecord]) -> Vec<CategorySummary> {
    let counts = counts_by_category(records);
    Category::ALL
        .iter()
        .map(|&category| CategorySummary {
            category,
            title: category.ui_label(),
            count: counts.get(category.stored_label()).copied().unwrap_or(0),
        })
        .collect()
}

/// Up to `n` records ordered by `key` descending.
///
/// Records without a key sort after every keyed record. The sort is stable, so
/// equal keys keep their collection order.
pub fn top_by_key<F>(records: &[DatasetRecord], key: F, n: usize) -> Vec<&DatasetRecord>
where
    F: Fn(&DatasetRecord) -> Option<u64>,
{
    let mut ranked: Vec<&DatasetRecord> = records.iter().collect();
    // `None < Some(_)`, so reversing puts absent values last
    ranked.sort_by_key(|record| Reverse(key(record)));
    ranked.truncate(n);
    ranked
}

pub fn top_by_popularity(
    records: &[DatasetRecord],
    field: RankingField,
    n: usize,
) -> Vec<&DatasetRecord> {
    top_by_key(records, |record| field.value(record), n)
}

pub fn filter_by(records: &[DatasetRecord], category: Category) -> Vec<&DatasetRecord> {
    let stored = category.stored_label();
    records
        .iter()
        .filter(|record| record.content_type == stored)
        .collect()
}

/// Filter by a UI label such as "新聞內容"; unknown labels match nothing
pub fn filter_by_category<'a>(
    records: &'a [DatasetRecord],
    label: &str,
) -> Vec<&'a DatasetRecord> {
    match Category::from_ui_label(label) {
        Some(category) => filter_by(records, category),
        None => Vec::new(),
    }
}

pub fn find_by_id<'a>(
    records: &'a [DatasetRecord],
    id: &DatasetId,
) -> Option<&'a DatasetRecord> {
    records.iter().find(|record| &record.id == id)
}
