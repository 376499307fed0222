//! Builds the single Crossref works-search URL for a search.

use crate::params::SearchParams;

pub const DEFAULT_BASE_URL: &str = "https://api.crossref.org/works";

/// Fields requested from Crossref for every search.
pub const SELECT_FIELDS: &[&str] = &[
    "title",
    "author",
    "issued",
    "container-title",
    "DOI",
    "URL",
    "is-referenced-by-count",
];

/// Static parts of the request that come from configuration, not the form.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub base_url: String,
    /// Ask for the `link` field as well (needed for PDF detection).
    pub request_links: bool,
    /// Contact address for Crossref's polite pool.
    pub mailto: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_links: true,
            mailto: None,
        }
    }
}

/// `from-pub-date:<min>-01-01,until-pub-date:<max>-12-31`, either half
/// omitted when its year does not parse. Empty when neither parses.
pub fn date_filter(params: &SearchParams) -> String {
    let mut filters = Vec::with_capacity(2);
    if let Some(min) = params.min_year() {
        filters.push(format!("from-pub-date:{}-01-01", min));
    }
    if let Some(max) = params.max_year() {
        filters.push(format!("until-pub-date:{}-12-31", max));
    }
    filters.join(",")
}

pub fn build_url(params: &SearchParams, options: &QueryOptions) -> String {
    let mut select: Vec<&str> = SELECT_FIELDS.to_vec();
    if options.request_links {
        select.push("link");
    }

    let mut query = vec![
        format!("query={}", urlencoding::encode(params.query_text())),
        format!("rows={}", params.rows()),
        format!("select={}", select.join(",")),
        "sort=score".to_string(),
        "order=desc".to_string(),
    ];

    let filter = date_filter(params);
    if !filter.is_empty() {
        query.push(format!("filter={}", urlencoding::encode(&filter)));
    }

    if let Some(email) = options.mailto.as_deref().filter(|e| !e.is_empty()) {
        query.push(format!("mailto={}", urlencoding::encode(email)));
    }

    format!("{}?{}", options.base_url, query.join("&"))
}
