//! Bibliographic records as returned by the Crossref works endpoint.
//!
//! Records are kept as the raw JSON object so they survive a persistence
//! round-trip byte-for-byte. Field access goes through tolerant accessors:
//! a missing or wrongly-typed field reads as `None`/empty, never as an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single work (publication) entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkRecord(Value);

/// One entry of a record's `author` list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    pub given: Option<String>,
    pub family: Option<String>,
}

/// One entry of a record's `link` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLink {
    pub url: String,
    pub content_type: String,
}

impl WorkRecord {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Title as given: first element when `title` is a sequence, the string
    /// itself when scalar.
    pub fn title(&self) -> Option<&str> {
        text_or_first(&self.0["title"]).filter(|t| !t.is_empty())
    }

    pub fn authors(&self) -> Vec<Author> {
        self.0["author"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .map(|a| Author {
                        given: non_empty(a["given"].as_str()),
                        family: non_empty(a["family"].as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `issued.date-parts`, e.g. `[[2021, 3, 4]]`.
    pub fn date_parts(&self) -> Option<&Vec<Value>> {
        self.0["issued"]["date-parts"].as_array()
    }

    pub fn container_title(&self) -> Option<&str> {
        text_or_first(&self.0["container-title"])
    }

    pub fn doi(&self) -> Option<&str> {
        self.0["DOI"].as_str().filter(|d| !d.is_empty())
    }

    pub fn url(&self) -> Option<&str> {
        self.0["URL"].as_str().filter(|u| !u.is_empty())
    }

    /// `is-referenced-by-count`, present only when it is a JSON number.
    pub fn citation_count(&self) -> Option<u64> {
        let value = &self.0["is-referenced-by-count"];
        value
            .as_u64()
            .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    }

    pub fn links(&self) -> Vec<WorkLink> {
        self.0["link"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|l| {
                        let url = l["URL"].as_str()?;
                        Some(WorkLink {
                            url: url.to_string(),
                            content_type: l["content-type"].as_str().unwrap_or("").to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `https://doi.org/<DOI>`, or empty when the record has no DOI.
    pub fn doi_url(&self) -> String {
        self.doi()
            .map(|d| format!("https://doi.org/{}", d))
            .unwrap_or_default()
    }

    /// The record's own URL, falling back to the DOI resolver URL.
    pub fn open_url(&self) -> String {
        match self.url() {
            Some(u) => u.to_string(),
            None => self.doi_url(),
        }
    }
}

impl From<Value> for WorkRecord {
    fn from(raw: Value) -> Self {
        Self(raw)
    }
}

fn text_or_first(value: &Value) -> Option<&str> {
    match value {
        Value::Array(arr) => arr.first().and_then(|v| v.as_str()),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(String::from)
}
