//! Result list → display description.
//!
//! [`render`] is a pure mapping; front ends draw the returned [`ResultsView`]
//! (terminal lines, or HTML via [`ResultsView::to_html`]).

use crate::normalize;
use crate::record::WorkRecord;

pub const NO_RESULTS: &str = "Tidak ada hasil";
pub const UNTITLED: &str = "Tanpa judul";
pub const COPY_LABEL: &str = "Salin sitasi";
pub const COPIED_LABEL: &str = "Tersalin";
pub const DEFAULT_ALT_LOOKUP_BASE: &str = "https://unpaywall.org/";

/// Per-record link settings.
#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Prefix of the alternate-access lookup; the DOI is appended.
    pub alt_lookup_base: String,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            alt_lookup_base: DEFAULT_ALT_LOOKUP_BASE.to_string(),
        }
    }
}

impl LinkOptions {
    pub fn alt_lookup_url(&self, doi: &str) -> String {
        format!("{}{}", self.alt_lookup_base, doi)
    }
}

/// An action control attached to a rendered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    Doi { url: String },
    Open { url: String },
    Pdf { url: String },
    AltLookup { url: String },
    /// Copy the citation of the item at `index` in the rendered list.
    CopyCitation { index: usize },
}

impl ItemAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Doi { .. } => "DOI",
            Self::Open { .. } => "Buka",
            Self::Pdf { .. } => "PDF",
            Self::AltLookup { .. } => "Akses alternatif",
            Self::CopyCitation { .. } => COPY_LABEL,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Doi { url } | Self::Open { url } | Self::Pdf { url } | Self::AltLookup { url } => {
                Some(url)
            }
            Self::CopyCitation { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// 1-based position.
    pub ordinal: usize,
    pub title: String,
    pub authors: String,
    /// Authors, year, journal and citation count, " • "-separated.
    pub meta: String,
    pub actions: Vec<ItemAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    Empty,
    Items(Vec<ItemView>),
}

pub fn display_title(item: &WorkRecord) -> String {
    item.title().unwrap_or(UNTITLED).to_string()
}

/// Present segments only, so a bullet never dangles at either end.
pub fn meta_line(item: &WorkRecord) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(4);
    let authors = normalize::authors(item);
    if !authors.is_empty() {
        segments.push(authors);
    }
    if let Some(year) = normalize::year(item) {
        segments.push(year.to_string());
    }
    let journal = normalize::journal(item);
    if !journal.is_empty() {
        segments.push(journal);
    }
    segments.push(format!("Sitasi: {}", item.citation_count().unwrap_or(0)));
    segments.join(" • ")
}

pub fn item_actions(item: &WorkRecord, index: usize, links: &LinkOptions) -> Vec<ItemAction> {
    let mut actions = Vec::with_capacity(5);
    let doi_url = item.doi_url();
    if !doi_url.is_empty() {
        actions.push(ItemAction::Doi {
            url: doi_url.clone(),
        });
    }
    let open = item.open_url();
    if !open.is_empty() {
        actions.push(ItemAction::Open { url: open });
    }
    let pdf = normalize::pdf_link(item);
    if !pdf.is_empty() {
        actions.push(ItemAction::Pdf { url: pdf });
    }
    if let Some(doi) = item.doi() {
        actions.push(ItemAction::AltLookup {
            url: links.alt_lookup_url(doi),
        });
    }
    actions.push(ItemAction::CopyCitation { index });
    actions
}

pub fn render(items: &[&WorkRecord], links: &LinkOptions) -> ResultsView {
    if items.is_empty() {
        return ResultsView::Empty;
    }
    ResultsView::Items(
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| ItemView {
                ordinal: idx + 1,
                title: display_title(item),
                authors: normalize::authors(item),
                meta: meta_line(item),
                actions: item_actions(item, idx, links),
            })
            .collect(),
    )
}

impl ResultsView {
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn items(&self) -> &[ItemView] {
        match self {
            Self::Empty => &[],
            Self::Items(items) => items,
        }
    }

    /// Markup for an HTML result container.
    pub fn to_html(&self) -> String {
        let items = match self {
            Self::Empty => return format!("<div class=\"empty\">{}</div>", NO_RESULTS),
            Self::Items(items) => items,
        };
        let mut out = String::new();
        for item in items {
            out.push_str("<div class=\"item\">\n");
            out.push_str(&format!("  <div class=\"num\">{}</div>\n", item.ordinal));
            out.push_str("  <div>\n");
            out.push_str(&format!("    <h3>{}</h3>\n", html_escape(&item.title)));
            out.push_str(&format!(
                "    <div class=\"meta\">{}</div>\n",
                html_escape(&item.meta)
            ));
            out.push_str("  </div>\n");
            out.push_str("  <div class=\"actions\">\n");
            for action in &item.actions {
                match action {
                    ItemAction::CopyCitation { index } => out.push_str(&format!(
                        "    <button class=\"cite\" data-index=\"{}\">{}</button>\n",
                        index,
                        action.label()
                    )),
                    _ => {
                        let class = match action {
                            ItemAction::Doi { .. } => "doi",
                            ItemAction::Open { .. } => "open",
                            ItemAction::Pdf { .. } => "pdf",
                            _ => "alt",
                        };
                        out.push_str(&format!(
                            "    <a class=\"link {}\" href=\"{}\" target=\"_blank\">{}</a>\n",
                            class,
                            html_escape(action.url().unwrap_or("")),
                            action.label()
                        ));
                    }
                }
            }
            out.push_str("  </div>\n");
            out.push_str("</div>\n");
        }
        out
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
