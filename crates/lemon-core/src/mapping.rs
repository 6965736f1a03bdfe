//! # Remote Record Mapping
//!
//! Wire types for the remote menu document and the mapping rule that turns
//! a raw record into a [`MenuItem`] cache row.
//!
//! The feed is not trusted to be well-formed: every field is optional, the
//! price may arrive as a number or a string, and the document may be either
//! `{ "menu": [...] }` or a legacy bare array. Mapping never fails; missing
//! or malformed fields fall back to safe defaults:
//!
//! | field     | default                         |
//! |-----------|---------------------------------|
//! | id        | 1-based position in the document|
//! | name      | `"Untitled"` (via `title` first)|
//! | price     | `0.0` on parse failure          |
//! | category  | capitalized, or `"Uncategorized"`|
//! | available | `true`                          |

use serde::Deserialize;

use crate::types::MenuItem;
use crate::{DEFAULT_CATEGORY, DEFAULT_ITEM_NAME};

// =============================================================================
// Wire Types
// =============================================================================

/// The remote menu document: `{ "menu": [...] }` or a legacy bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RemoteMenuDocument {
    Wrapped { menu: Vec<RemoteMenuRecord> },
    Bare(Vec<RemoteMenuRecord>),
}

impl RemoteMenuDocument {
    /// Unwraps the record list regardless of document shape.
    pub fn into_records(self) -> Vec<RemoteMenuRecord> {
        match self {
            RemoteMenuDocument::Wrapped { menu } => menu,
            RemoteMenuDocument::Bare(items) => items,
        }
    }
}

/// An id that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    fn as_i64(&self) -> Option<i64> {
        match self {
            RawId::Int(v) => Some(*v),
            RawId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A price that may arrive as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    /// Coerces to a number; parse failures become 0.
    fn as_f64(&self) -> f64 {
        match self {
            RawPrice::Number(v) => *v,
            RawPrice::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

/// One raw record from the remote feed. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteMenuRecord {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Legacy alias for `name` used by older feed snapshots.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, rename = "prepareTime")]
    pub prepare_time: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

// =============================================================================
// Mapping
// =============================================================================

/// Capitalizes the first letter of a category for display.
///
/// Blank input maps to [`DEFAULT_CATEGORY`].
pub fn capitalize_category(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => {
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => DEFAULT_CATEGORY.to_string(),
            }
        }
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

/// Maps one raw record into a cache row.
///
/// `position` is the record's 0-based index in the document; it supplies
/// the fallback id (1-based) when the record carries none.
pub fn map_record(record: RemoteMenuRecord, position: usize) -> MenuItem {
    let name = [record.name, record.title]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string());

    MenuItem {
        id: record
            .id
            .and_then(|id| id.as_i64())
            .unwrap_or(position as i64 + 1),
        name,
        description: record.description.unwrap_or_default(),
        price: record.price.map(|p| p.as_f64()).unwrap_or(0.0),
        category: capitalize_category(record.category.as_deref()),
        image: record.image.unwrap_or_default(),
        rating: record.rating,
        prepare_time: record.prepare_time,
        available: record.available.unwrap_or(true),
        tags: record.tags,
    }
}

/// Maps a whole document's records in order.
pub fn map_records(records: Vec<RemoteMenuRecord>) -> Vec<MenuItem> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| map_record(record, position))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_and_bare_documents_parse() {
        let wrapped: RemoteMenuDocument =
            serde_json::from_str(r#"{"menu": [{"name": "Greek Salad"}]}"#).unwrap();
        assert_eq!(wrapped.into_records().len(), 1);

        let bare: RemoteMenuDocument =
            serde_json::from_str(r#"[{"name": "Bruschetta"}, {"name": "Lemon Dessert"}]"#).unwrap();
        assert_eq!(bare.into_records().len(), 2);
    }

    #[test]
    fn test_missing_id_defaults_to_position() {
        let records: Vec<RemoteMenuRecord> =
            serde_json::from_str(r#"[{"name": "A"}, {"name": "B"}, {"id": 9, "name": "C"}]"#)
                .unwrap();
        let items = map_records(records);

        assert_eq!(items[0].id, 1);
        assert_eq!(items[1].id, 2);
        assert_eq!(items[2].id, 9);
    }

    #[test]
    fn test_string_id_is_coerced() {
        let record: RemoteMenuRecord = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
        assert_eq!(map_record(record, 0).id, 42);
    }

    #[test]
    fn test_missing_name_defaults_to_untitled() {
        let record: RemoteMenuRecord = serde_json::from_str(r#"{"price": 3.5}"#).unwrap();
        assert_eq!(map_record(record, 0).name, "Untitled");
    }

    #[test]
    fn test_title_is_a_name_fallback() {
        let record: RemoteMenuRecord =
            serde_json::from_str(r#"{"title": "Grilled Fish"}"#).unwrap();
        assert_eq!(map_record(record, 0).name, "Grilled Fish");
    }

    #[test]
    fn test_price_coercion() {
        let number: RemoteMenuRecord = serde_json::from_str(r#"{"price": 12.99}"#).unwrap();
        assert!((map_record(number, 0).price - 12.99).abs() < 1e-9);

        let text: RemoteMenuRecord = serde_json::from_str(r#"{"price": "7.5"}"#).unwrap();
        assert!((map_record(text, 0).price - 7.5).abs() < 1e-9);

        let garbage: RemoteMenuRecord = serde_json::from_str(r#"{"price": "$7.50"}"#).unwrap();
        assert_eq!(map_record(garbage, 0).price, 0.0);

        let missing: RemoteMenuRecord = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(map_record(missing, 0).price, 0.0);
    }

    #[test]
    fn test_category_capitalization_and_default() {
        assert_eq!(capitalize_category(Some("desserts")), "Desserts");
        assert_eq!(capitalize_category(Some("Mains")), "Mains");
        assert_eq!(capitalize_category(Some("  ")), "Uncategorized");
        assert_eq!(capitalize_category(None), "Uncategorized");
    }

    #[test]
    fn test_optional_fields_pass_through_with_defaults() {
        let record: RemoteMenuRecord = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Pasta",
                "rating": 4.5,
                "prepareTime": "20 min",
                "tags": ["vegetarian"]
            }"#,
        )
        .unwrap();
        let item = map_record(record, 0);

        assert_eq!(item.rating, Some(4.5));
        assert_eq!(item.prepare_time.as_deref(), Some("20 min"));
        assert_eq!(item.tags.as_deref(), Some(&["vegetarian".to_string()][..]));
        assert!(item.available);
    }
}
