use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// Catalog models, field names follow the JSON fixture

/// Dataset identifier; the fixture may use either integers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetId {
    Number(u64),
    Text(String),
}

impl DatasetId {
    /// Compare against user-supplied text such as a CLI argument
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            DatasetId::Number(n) => raw.trim().parse::<u64>().map_or(false, |r| r == *n),
            DatasetId::Text(s) => s == raw.trim(),
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetId::Number(n) => write!(f, "{}", n),
            DatasetId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRecord {
    pub id: DatasetId,
    pub name: String,
    #[serde(default)]
    pub provider: String,
    /// Stored category label, e.g. "新聞"
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub last_update: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_stats: Option<DataStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub licensing: Licensing,
}

impl DatasetRecord {
    pub fn article_count(&self) -> Option<u64> {
        self.data_stats.as_ref().and_then(|s| s.article_count)
    }

    pub fn word_count(&self) -> Option<u64> {
        self.data_stats.as_ref().and_then(|s| s.word_count)
    }

    pub fn book_count(&self) -> Option<u64> {
        self.data_stats.as_ref().and_then(|s| s.book_count)
    }

    pub fn time_range(&self) -> Option<&TimeRange> {
        self.data_stats.as_ref().and_then(|s| s.time_range.as_ref())
    }
}

/// Every statistic is independently optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStats {
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub article_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub book_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Licensing {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed_usage: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Amount in NT$
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Counts that are not a non-negative whole number read as absent
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn count_from_value(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Root object of the dataset fixture
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetCollection {
    #[serde(default)]
    pub datasets: Vec<DatasetRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "id": 7,
            "name": "聯合報新聞資料集",
            "provider": "聯合報",
            "contentType": "新聞",
            "lastUpdate": "2024-03-01",
            "dataStats": {
                "articleCount": 120000,
                "timeRange": { "start": "2015-01-01", "end": "2023-12-31" }
            },
            "licensing": {
                "type": "商業授權",
                "allowedUsage": ["AI訓練", "研究"],
                "pricing": { "amount": 500000 }
            }
        }"#;

        let record: DatasetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, DatasetId::Number(7));
        assert_eq!(record.article_count(), Some(120000));
        assert_eq!(record.word_count(), None);
        assert_eq!(record.time_range().map(|r| r.end.as_str()), Some("2023-12-31"));
        assert_eq!(record.licensing.license_type.as_deref(), Some("商業授權"));
        assert_eq!(record.licensing.pricing, Some(Pricing { amount: Some(500000) }));
    }

    #[test]
    fn test_sparse_record_uses_defaults() {
        let json = r#"{ "id": "ds-001", "name": "Sparse" }"#;
        let record: DatasetRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, DatasetId::Text("ds-001".to_string()));
        assert!(record.data_stats.is_none());
        assert!(record.article_count().is_none());
        assert!(record.licensing.license_type.is_none());
        assert!(record.licensing.allowed_usage.is_empty());
    }

    #[test]
    fn test_null_optional_structures_use_defaults() {
        let json = r#"{
            "id": 3,
            "name": "Nulls",
            "dataStats": null,
            "licensing": null
        }"#;
        let record: DatasetRecord = serde_json::from_str(json).unwrap();
        assert!(record.data_stats.is_none());
        assert_eq!(record.licensing, Licensing::default());

        let json = r#"{
            "id": 4,
            "name": "Partial",
            "licensing": { "type": null, "allowedUsage": null, "pricing": {} }
        }"#;
        let record: DatasetRecord = serde_json::from_str(json).unwrap();
        assert!(record.licensing.allowed_usage.is_empty());
        assert_eq!(record.licensing.pricing, Some(Pricing { amount: None }));
    }

    #[test]
    fn test_lenient_counts() {
        let json = r#"{
            "id": 5,
            "name": "Counts",
            "dataStats": {
                "articleCount": 1200.0,
                "wordCount": "many",
                "bookCount": -3
            },
            "licensing": { "pricing": { "amount": null } }
        }"#;
        let record: DatasetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.article_count(), Some(1200));
        assert_eq!(record.word_count(), None);
        assert_eq!(record.book_count(), None);
        assert_eq!(record.licensing.pricing, Some(Pricing { amount: None }));
    }

    #[test]
    fn test_collection_without_datasets_key_is_empty() {
        let collection: DatasetCollection = serde_json::from_str("{}").unwrap();
        assert!(collection.datasets.is_empty());
    }

    #[test]
    fn test_dataset_id_matches_raw_text() {
        assert!(DatasetId::Number(12).matches("12"));
        assert!(DatasetId::Number(12).matches(" 12 "));
        assert!(!DatasetId::Number(12).matches("12a"));
        assert!(DatasetId::Text("news-1".to_string()).matches("news-1"));
        assert!(!DatasetId::Text("news-1".to_string()).matches("news-2"));
    }
}
