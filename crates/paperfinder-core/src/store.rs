//! Key-value persistence for the last search state.
//!
//! The store contract never fails outward: `read` yields `None` for a
//! missing key, an unreadable backend or a value that does not parse, and
//! `write` completes whether or not the value landed. Failures are logged.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::params::SearchParams;
use crate::record::WorkRecord;

/// Fixed key the popup state lives under.
pub const STATE_KEY: &str = "pf_state_v1";

/// Snapshot written after every search and every parameter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(rename = "state")]
    pub params: SearchParams,
    #[serde(default)]
    pub results: Vec<WorkRecord>,
    #[serde(rename = "ts", default)]
    pub saved_at_ms: i64,
}

impl PersistedState {
    pub fn new(params: SearchParams, results: Vec<WorkRecord>) -> Self {
        Self {
            params,
            results,
            saved_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Local key-value storage.
pub trait StateStore: Send + Sync {
    fn read<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<Value>>;

    fn write<'a>(&'a self, key: &'a str, value: Value) -> StoreFuture<'a, ()>;
}

/// Read and decode the popup state. Any failure reads as "no prior state".
pub async fn load_state(store: &dyn StateStore) -> Option<PersistedState> {
    let raw = store.read(STATE_KEY).await?;
    match serde_json::from_value::<PersistedState>(raw) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable saved state");
            None
        }
    }
}

/// Encode and write the popup state, replacing any previous value.
pub async fn save_state(store: &dyn StateStore, state: &PersistedState) {
    match serde_json::to_value(state) {
        Ok(value) => store.write(STATE_KEY, value).await,
        Err(e) => tracing::warn!(error = %e, "failed to encode state"),
    }
}

/// In-process store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for MemoryStore {
    fn read<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<Value>> {
        let value = self
            .entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned());
        Box::pin(async move { value })
    }

    fn write<'a>(&'a self, key: &'a str, value: Value) -> StoreFuture<'a, ()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
        Box::pin(async {})
    }
}

/// One JSON object on disk mapping keys to values.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/paperfinder/storage.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("paperfinder").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Option<serde_json::Map<String, Value>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "storage read failed");
                return None;
            }
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "storage file is not a JSON object");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "storage file is corrupt");
                None
            }
        }
    }

    async fn write_all(&self, map: serde_json::Map<String, Value>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_vec_pretty(&Value::Object(map))?;
        // Readers only ever see a complete file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await
    }
}

impl StateStore for JsonFileStore {
    fn read<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<Value>> {
        Box::pin(async move { self.read_all().await?.remove(key) })
    }

    fn write<'a>(&'a self, key: &'a str, value: Value) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut map = self.read_all().await.unwrap_or_default();
            map.insert(key.to_string(), value);
            if let Err(e) = self.write_all(map).await {
                tracing::warn!(path = %self.path.display(), error = %e, "storage write failed");
            }
        })
    }
}
