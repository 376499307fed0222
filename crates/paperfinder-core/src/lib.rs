//! Search Crossref for papers, filter and render the results, keep the last
//! search around, export CSV and copy citations.

pub mod config_file;
pub mod export;
pub mod filter;
pub mod finder;
pub mod normalize;
pub mod params;
pub mod query;
pub mod record;
pub mod render;
pub mod session;
pub mod source;
pub mod store;

// Re-export for convenience
pub use config_file::{ConfigFile, Overrides, Settings};
pub use export::{
    Clipboard, ClipboardError, CopyFeedback, CopyOutcome, ExportError, Osc52Clipboard,
};
pub use finder::{PaperFinder, SearchOutcome};
pub use params::{ParamField, SearchParams};
pub use query::QueryOptions;
pub use record::{Author, WorkLink, WorkRecord};
pub use render::{ItemAction, ItemView, LinkOptions, ResultsView};
pub use session::{Phase, Session, Status};
pub use source::crossref::Crossref;
pub use source::{FetchError, WorksSource};
pub use store::{JsonFileStore, MemoryStore, PersistedState, STATE_KEY, StateStore};

use std::sync::Arc;

/// Wire a [`PaperFinder`] to Crossref and the JSON file store described by
/// `settings`, then restore any saved state.
pub async fn open(settings: &Settings) -> PaperFinder {
    let source = Arc::new(Crossref::new(
        reqwest::Client::new(),
        settings.query.mailto.clone(),
    ));
    let store = Arc::new(JsonFileStore::new(&settings.state_path));
    let mut finder = PaperFinder::new(
        source,
        store,
        settings.query.clone(),
        settings.links.clone(),
    );
    finder.restore().await;
    finder
}
