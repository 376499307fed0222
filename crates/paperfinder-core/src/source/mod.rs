//! Where search results come from.

pub mod crossref;
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;

use crate::record::WorkRecord;

/// Why a fetch failed. All variants surface to the user as one generic
/// failure message; the distinction is kept for logs and tests.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Body(String),
}

/// A source of work records for a prepared request URL.
pub trait WorksSource: Send + Sync {
    /// Short name used in logs (e.g. "Crossref").
    fn name(&self) -> &str;

    /// Issue exactly one request for `url` and return its items.
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<WorkRecord>, FetchError>> + Send + 'a>>;
}

/// `message.items` of a works response; anything else is an empty list.
pub fn extract_items(body: &Value) -> Vec<WorkRecord> {
    body["message"]["items"]
        .as_array()
        .map(|items| items.iter().cloned().map(WorkRecord::new).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn items_extracted_in_order() {
        let body = json!({"message": {"items": [{"DOI": "1"}, {"DOI": "2"}]}});
        let items = extract_items(&body);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].doi(), Some("2"));
    }

    #[test]
    fn missing_or_wrong_items_is_empty() {
        assert!(extract_items(&json!({})).is_empty());
        assert!(extract_items(&json!({"message": null})).is_empty());
        assert!(extract_items(&json!({"message": {"items": {"a": 1}}})).is_empty());
        assert!(extract_items(&json!([1, 2])).is_empty());
    }
}
