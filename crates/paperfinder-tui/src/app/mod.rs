mod update;
mod util;

use std::path::PathBuf;
use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use paperfinder_core::{
    Clipboard, CopyFeedback, FetchError, Osc52Clipboard, PaperFinder, ParamField, WorkRecord,
};

use crate::theme::Theme;
use crate::view;

/// Result of a fetch task, sent back to the event loop.
pub type FetchResult = Result<Vec<WorkRecord>, FetchError>;

/// Which control has keyboard focus. Tab order is the declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(ParamField),
    OnlyPdf,
    Results,
}

impl Focus {
    fn order() -> Vec<Focus> {
        let mut order: Vec<Focus> = ParamField::all().iter().copied().map(Focus::Field).collect();
        order.push(Focus::OnlyPdf);
        order.push(Focus::Results);
        order
    }

    pub fn next(self) -> Self {
        let order = Self::order();
        let pos = order.iter().position(|f| *f == self).unwrap_or(0);
        order[(pos + 1) % order.len()]
    }

    pub fn prev(self) -> Self {
        let order = Self::order();
        let pos = order.iter().position(|f| *f == self).unwrap_or(0);
        order[(pos + order.len() - 1) % order.len()]
    }
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Text field focused: printable keys are typed.
    Editing,
    /// PDF-only checkbox focused.
    Toggle,
    /// Result list focused: letters are commands.
    Browsing,
}

/// Popups drawn over the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Links of the result at this index.
    Links(usize),
    /// Clipboard refused; citation shown for manual selection.
    ManualCopy(String),
}

pub struct App {
    pub finder: PaperFinder,
    pub theme: Theme,
    pub focus: Focus,
    /// Index into the visible result list.
    pub selected: usize,
    pub overlay: Option<Overlay>,
    pub copy_feedback: Option<CopyFeedback>,
    /// One-line message for exports and config saves.
    pub notice: Option<String>,
    pub download_dir: PathBuf,
    pub should_quit: bool,
    pub tick: usize,
    clipboard: Box<dyn Clipboard>,
    fetch_tx: Option<mpsc::UnboundedSender<FetchResult>>,
}

impl App {
    pub fn new(finder: PaperFinder, theme: Theme, download_dir: PathBuf) -> Self {
        Self {
            finder,
            theme,
            focus: Focus::Field(ParamField::Query),
            selected: 0,
            overlay: None,
            copy_feedback: None,
            notice: None,
            download_dir,
            should_quit: false,
            tick: 0,
            clipboard: Box::new(Osc52Clipboard::stdout()),
            fetch_tx: None,
        }
    }

    /// Where finished fetches are delivered; without one, searches never
    /// start.
    pub fn with_fetch_channel(mut self, tx: mpsc::UnboundedSender<FetchResult>) -> Self {
        self.fetch_tx = Some(tx);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn input_mode(&self) -> InputMode {
        match self.focus {
            Focus::Field(_) => InputMode::Editing,
            Focus::OnlyPdf => InputMode::Toggle,
            Focus::Results => InputMode::Browsing,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.finder.view().map(|v| v.len()).unwrap_or(0)
    }

    /// Label of the copy control for the item at `index` right now.
    pub fn copy_label(&self, index: usize) -> &'static str {
        CopyFeedback::label_for(self.copy_feedback.as_ref(), index, Instant::now())
    }

    pub fn view(&self, f: &mut Frame) {
        let area = view::popup_area(f.area());
        let chunks = Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Length(8), // form
            Constraint::Length(1), // status
            Constraint::Min(3),    // results
            Constraint::Length(1), // footer
        ])
        .split(area);

        view::form::render_header(f, chunks[0], self);
        view::form::render(f, chunks[1], self);
        view::results::render_status(f, chunks[2], self);
        view::results::render(f, chunks[3], self);
        view::footer::render(f, chunks[4], self);

        match &self.overlay {
            Some(Overlay::Links(index)) => view::popup::render_links(f, self, *index),
            Some(Overlay::ManualCopy(text)) => view::popup::render_manual_copy(f, &self.theme, text),
            None => {}
        }
    }
}
