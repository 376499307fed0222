use std::fmt;

use crate::params::SearchParams;
use crate::record::WorkRecord;

/// Search lifecycle. Success and failure fall straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
}

/// The status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Blank,
    Searching,
    Showing(usize),
    Restored(usize),
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Searching => write!(f, "Mencari..."),
            Self::Showing(n) => write!(f, "Menampilkan {} hasil", n),
            Self::Restored(n) => write!(f, "Riwayat: {} hasil", n),
            Self::Failed => write!(f, "Terjadi kesalahan"),
        }
    }
}

/// Everything the popup knows between events.
///
/// `last_results` is the citation-filtered list of the latest successful
/// search and is exactly what gets persisted; the PDF-only toggle only
/// narrows what is displayed.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub params: SearchParams,
    last_results: Vec<WorkRecord>,
    phase: Phase,
    status: Status,
    /// False while the result area is cleared (before the first render and
    /// during a search).
    displayed: bool,
}

impl Session {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    pub fn last_results(&self) -> &[WorkRecord] {
        &self.last_results
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// The search trigger is disabled while a search is in flight.
    pub fn can_search(&self) -> bool {
        self.phase == Phase::Idle && !self.params.query_text().is_empty()
    }

    pub(crate) fn enter_searching(&mut self) {
        self.phase = Phase::Searching;
        self.status = Status::Searching;
        self.displayed = false;
    }

    pub(crate) fn succeed(&mut self, results: Vec<WorkRecord>) {
        self.status = Status::Showing(results.len());
        self.last_results = results;
        self.displayed = true;
        self.phase = Phase::Idle;
    }

    /// Results and persisted state stay as they were before the search.
    pub(crate) fn fail(&mut self) {
        self.status = Status::Failed;
        self.phase = Phase::Idle;
    }

    pub(crate) fn restore(&mut self, params: SearchParams, results: Vec<WorkRecord>) {
        self.params = params;
        self.last_results = results;
        if !self.last_results.is_empty() {
            self.status = Status::Restored(self.last_results.len());
            self.displayed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_texts() {
        assert_eq!(Status::Blank.to_string(), "");
        assert_eq!(Status::Searching.to_string(), "Mencari...");
        assert_eq!(Status::Showing(3).to_string(), "Menampilkan 3 hasil");
        assert_eq!(Status::Restored(1).to_string(), "Riwayat: 1 hasil");
        assert_eq!(Status::Failed.to_string(), "Terjadi kesalahan");
    }

    #[test]
    fn cannot_search_with_blank_query_or_while_searching() {
        let mut s = Session::new(SearchParams {
            query: "   ".into(),
            ..Default::default()
        });
        assert!(!s.can_search());
        s.params.query = "graphs".into();
        assert!(s.can_search());
        s.enter_searching();
        assert!(!s.can_search());
        assert!(!s.is_displayed());
        s.fail();
        assert!(s.can_search());
    }

    #[test]
    fn restore_with_no_results_keeps_area_clear() {
        let mut s = Session::default();
        s.restore(SearchParams::default(), vec![]);
        assert!(!s.is_displayed());
        assert_eq!(s.status(), &Status::Blank);
    }
}
