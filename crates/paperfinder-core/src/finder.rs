//! Search orchestration: one search at a time, driven by user intents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::export::{self, Clipboard, CopyOutcome, ExportError};
use crate::filter;
use crate::normalize;
use crate::params::{ParamField, SearchParams};
use crate::query::{self, QueryOptions};
use crate::record::WorkRecord;
use crate::render::{self, LinkOptions, ResultsView};
use crate::session::{Phase, Session};
use crate::source::{FetchError, WorksSource};
use crate::store::{self, PersistedState, StateStore};

/// How a search request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query or a search already in flight; nothing happened.
    Skipped,
    Succeeded(usize),
    Failed,
}

/// Owns the session and the two external boundaries (works source and
/// state store).
pub struct PaperFinder {
    source: Arc<dyn WorksSource>,
    store: Arc<dyn StateStore>,
    query_options: QueryOptions,
    links: LinkOptions,
    session: Session,
}

impl PaperFinder {
    pub fn new(
        source: Arc<dyn WorksSource>,
        store: Arc<dyn StateStore>,
        query_options: QueryOptions,
        links: LinkOptions,
    ) -> Self {
        Self {
            source,
            store,
            query_options,
            links,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn params(&self) -> &SearchParams {
        &self.session.params
    }

    pub fn source(&self) -> Arc<dyn WorksSource> {
        Arc::clone(&self.source)
    }

    pub fn links(&self) -> &LinkOptions {
        &self.links
    }

    /// Repopulate params and last results from storage, without fetching.
    pub async fn restore(&mut self) -> bool {
        match store::load_state(self.store.as_ref()).await {
            Some(saved) => {
                let count = saved.results.len();
                self.session
                    .restore(saved.params.with_defaults(), saved.results);
                tracing::debug!(results = count, "restored saved state");
                true
            }
            None => false,
        }
    }

    /// Snapshot the session into storage, replacing the previous value.
    pub async fn save_state(&self) {
        let state = PersistedState::new(
            self.session.params.clone(),
            self.session.last_results().to_vec(),
        );
        store::save_state(self.store.as_ref(), &state).await;
    }

    /// Replace all params (a form edit) and persist.
    pub async fn set_params(&mut self, params: SearchParams) {
        self.session.params = params;
        self.save_state().await;
    }

    pub async fn set_field(&mut self, field: ParamField, value: impl Into<String>) {
        *self.session.params.field_mut(field) = value.into();
        self.save_state().await;
    }

    pub async fn set_only_pdf(&mut self, only_pdf: bool) {
        self.session.params.only_pdf = only_pdf;
        self.save_state().await;
    }

    /// Request URL for the current params.
    pub fn request_url(&self) -> String {
        query::build_url(&self.session.params, &self.query_options)
    }

    /// Idle → Searching. Returns the URL to fetch, or `None` when the query
    /// is blank or a search is already running.
    pub fn begin_search(&mut self) -> Option<String> {
        if !self.session.can_search() {
            return None;
        }
        let url = self.request_url();
        self.session.enter_searching();
        Some(url)
    }

    /// Searching → Idle with the fetch result applied.
    pub async fn complete_search(
        &mut self,
        fetched: Result<Vec<WorkRecord>, FetchError>,
    ) -> SearchOutcome {
        match fetched {
            Ok(items) => {
                let fetched_count = items.len();
                let kept = filter::filter_by_citations(items, &self.session.params);
                tracing::info!(
                    fetched = fetched_count,
                    kept = kept.len(),
                    query = self.session.params.query_text(),
                    "search complete"
                );
                let count = kept.len();
                let state = PersistedState::new(self.session.params.clone(), kept.clone());
                store::save_state(self.store.as_ref(), &state).await;
                self.session.succeed(kept);
                SearchOutcome::Succeeded(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                self.session.fail();
                SearchOutcome::Failed
            }
        }
    }

    /// Run a complete search cycle in place.
    pub async fn search(&mut self) -> SearchOutcome {
        let Some(url) = self.begin_search() else {
            return SearchOutcome::Skipped;
        };
        let source = Arc::clone(&self.source);
        let fetched = source.fetch(&url).await;
        self.complete_search(fetched).await
    }

    pub fn is_searching(&self) -> bool {
        self.session.phase() == Phase::Searching
    }

    /// Stored results narrowed by the PDF-only toggle.
    pub fn visible_results(&self) -> Vec<&WorkRecord> {
        filter::pdf_view(self.session.last_results(), self.session.params.only_pdf)
    }

    /// The result area, or `None` while it is cleared.
    pub fn view(&self) -> Option<ResultsView> {
        if !self.session.is_displayed() {
            return None;
        }
        Some(render::render(&self.visible_results(), &self.links))
    }

    /// Save the visible results as CSV into `dir`; `None` when empty.
    pub fn export_csv(&self, dir: &Path) -> Result<Option<PathBuf>, ExportError> {
        export::save_csv(dir, self.session.params.query_text(), &self.visible_results())
    }

    /// Citation for the item at `index` in the visible list; `None` while
    /// the result area is cleared.
    pub fn citation(&self, index: usize) -> Option<String> {
        if !self.session.is_displayed() {
            return None;
        }
        self.visible_results()
            .get(index)
            .map(|item| normalize::citation(item))
    }

    pub fn copy_citation(
        &self,
        index: usize,
        clipboard: &mut dyn Clipboard,
    ) -> Option<CopyOutcome> {
        let text = self.citation(index)?;
        Some(export::copy_with_fallback(clipboard, text))
    }
}
