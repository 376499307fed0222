//! CSV export and citation copy.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::normalize;
use crate::record::WorkRecord;
use crate::render::{COPIED_LABEL, COPY_LABEL};

pub const CSV_HEADER: [&str; 8] = [
    "No", "Title", "Authors", "Year", "Journal", "Citations", "DOI", "URL",
];
pub const DEFAULT_FILE_STEM: &str = "paper_finder";
pub const MAX_SLUG_CHARS: usize = 40;
/// How long the copy control shows its acknowledgment.
pub const COPY_ACK: Duration = Duration::from_millis(900);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn csv_row(index: usize, item: &WorkRecord) -> [String; 8] {
    let doi = item.doi_url();
    [
        (index + 1).to_string(),
        item.title().unwrap_or("").to_string(),
        normalize::authors(item),
        normalize::year(item).map(|y| y.to_string()).unwrap_or_default(),
        normalize::journal(item),
        item.citation_count()
            .map(|c| c.to_string())
            .unwrap_or_default(),
        doi.clone(),
        item.url().map(String::from).unwrap_or(doi),
    ]
}

/// Header plus one row per item; every field quoted, quotes doubled. Rows
/// are separated by `\n` with no newline after the last one.
pub fn to_csv(items: &[&WorkRecord]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for (i, item) in items.iter().enumerate() {
        writer.write_record(csv_row(i, item))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
    let mut out = String::from_utf8_lossy(&bytes).into_owned();
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

/// `<slug>_results.csv` from the query text.
///
/// Whitespace runs become `_`, characters unsafe in file names are dropped,
/// and the slug is capped at 40 characters.
pub fn export_filename(query: &str) -> String {
    let mut slug = String::new();
    let mut in_space = false;
    for c in query.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            continue;
        }
        slug.push(c);
    }
    let slug: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    let stem = if slug.is_empty() || slug.chars().all(|c| c == '.') {
        DEFAULT_FILE_STEM.to_string()
    } else {
        slug
    };
    format!("{}_results.csv", stem)
}

/// Write the CSV for `items` into `dir`. Returns `None` without touching the
/// filesystem when there is nothing to export.
pub fn save_csv(
    dir: &Path,
    query: &str,
    items: &[&WorkRecord],
) -> Result<Option<PathBuf>, ExportError> {
    if items.is_empty() {
        return Ok(None);
    }
    let content = to_csv(items)?;
    let path = dir.join(export_filename(query));
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.clone(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;
    let mut file = std::fs::File::create(&path).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;
    tracing::info!(path = %path.display(), rows = items.len(), "exported results");
    Ok(Some(path))
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Write-only system clipboard.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard via the OSC 52 terminal escape sequence.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        self.out
            .write_all(format!("\x1b]52;c;{}\x07", encoded).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

/// What happened to a citation copy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(String),
    /// Clipboard refused; the text should be shown for manual selection.
    Manual(String),
}

impl CopyOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Copied(t) | Self::Manual(t) => t,
        }
    }
}

/// Copy `text`, falling back to manual selection when the clipboard fails.
pub fn copy_with_fallback(clipboard: &mut dyn Clipboard, text: String) -> CopyOutcome {
    match clipboard.copy(&text) {
        Ok(()) => CopyOutcome::Copied(text),
        Err(e) => {
            tracing::debug!(error = %e, "clipboard copy failed, offering manual selection");
            CopyOutcome::Manual(text)
        }
    }
}

/// Transient "copied" acknowledgment on one item's copy control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    pub index: usize,
    until: Instant,
}

impl CopyFeedback {
    pub fn start(index: usize, now: Instant) -> Self {
        Self {
            index,
            until: now + COPY_ACK,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.until
    }

    /// Label of the copy control for `index` at `now`.
    pub fn label_for(feedback: Option<&Self>, index: usize, now: Instant) -> &'static str {
        match feedback {
            Some(f) if f.index == index && f.is_active(now) => COPIED_LABEL,
            _ => COPY_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<WorkRecord> {
        vec![
            WorkRecord::new(json!({
                "title": ["Commas, \"quotes\" and more"],
                "author": [{"given": "Jane", "family": "Doe"}, {"family": "Roe"}],
                "issued": {"date-parts": [[2020]]},
                "container-title": "Journal, Inc.",
                "is-referenced-by-count": 12,
                "DOI": "10.1/a"
            })),
            WorkRecord::new(json!({"URL": "https://example.org/b"})),
        ]
    }

    #[test]
    fn csv_quotes_every_field() {
        let items = sample();
        let refs: Vec<&WorkRecord> = items.iter().collect();
        let csv = to_csv(&refs).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            r#""No","Title","Authors","Year","Journal","Citations","DOI","URL""#
        );
        assert_eq!(
            lines.next().unwrap(),
            r#""1","Commas, ""quotes"" and more","Jane Doe, Roe","2020","Journal, Inc.","12","https://doi.org/10.1/a","https://doi.org/10.1/a""#
        );
        assert_eq!(
            lines.next().unwrap(),
            r#""2","","","","","","","https://example.org/b""#
        );
        assert!(lines.next().is_none());
        assert!(csv.ends_with(r#""https://example.org/b""#));
    }

    #[test]
    fn csv_fields_round_trip() {
        let items = sample();
        let refs: Vec<&WorkRecord> = items.iter().collect();
        let csv = to_csv(&refs).unwrap();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Commas, \"quotes\" and more");
        assert_eq!(&rows[0][2], "Jane Doe, Roe");
        assert_eq!(&rows[0][4], "Journal, Inc.");
        assert_eq!(&rows[1][7], "https://example.org/b");
    }

    #[test]
    fn filename_slug_rules() {
        assert_eq!(export_filename("graph neural  networks"), "graph_neural_networks_results.csv");
        assert_eq!(export_filename(""), "paper_finder_results.csv");
        assert_eq!(export_filename("   "), "paper_finder_results.csv");
        assert_eq!(export_filename("a/b: c?"), "ab_c_results.csv");
        let long = "x".repeat(100);
        assert_eq!(export_filename(&long), format!("{}_results.csv", "x".repeat(40)));
    }

    #[test]
    fn zero_results_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = save_csv(dir.path(), "query", &[]).unwrap();
        assert!(out.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn save_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let items = sample();
        let refs: Vec<&WorkRecord> = items.iter().collect();
        let path = save_csv(dir.path(), "deep learning", &refs).unwrap().unwrap();
        assert_eq!(path.file_name().unwrap(), "deep_learning_results.csv");
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("\"No\""));
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn copy(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no terminal".into()))
        }
    }

    #[test]
    fn osc52_sequence_is_base64() {
        let mut clip = Osc52Clipboard::new(Vec::new());
        let outcome = copy_with_fallback(&mut clip, "hi".to_string());
        assert_eq!(outcome, CopyOutcome::Copied("hi".into()));
        assert_eq!(clip.into_inner(), b"\x1b]52;c;aGk=\x07".to_vec());
    }

    #[test]
    fn broken_clipboard_falls_back_to_manual() {
        let outcome = copy_with_fallback(&mut BrokenClipboard, "cite me".to_string());
        assert_eq!(outcome, CopyOutcome::Manual("cite me".into()));
        assert_eq!(outcome.text(), "cite me");
    }

    #[test]
    fn feedback_reverts_after_window() {
        let t0 = Instant::now();
        let fb = CopyFeedback::start(2, t0);
        assert_eq!(CopyFeedback::label_for(Some(&fb), 2, t0), COPIED_LABEL);
        assert_eq!(CopyFeedback::label_for(Some(&fb), 1, t0), COPY_LABEL);
        let later = t0 + Duration::from_millis(901);
        assert_eq!(CopyFeedback::label_for(Some(&fb), 2, later), COPY_LABEL);
        assert_eq!(CopyFeedback::label_for(None, 2, t0), COPY_LABEL);
    }
}
