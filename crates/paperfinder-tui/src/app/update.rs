use std::time::Instant;

use paperfinder_core::{CopyFeedback, CopyOutcome, SearchOutcome};

use super::{App, FetchResult, Focus, Overlay};
use crate::action::Action;

impl App {
    /// Apply one action. Param edits are persisted before this returns.
    pub async fn update(&mut self, action: Action) {
        if self.overlay.is_some() {
            match action {
                Action::Tick | Action::Resize(..) | Action::None => {}
                Action::Quit | Action::Search | Action::ShowLinks => {
                    self.overlay = None;
                    return;
                }
                _ => return,
            }
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::Input(c) => {
                if let Focus::Field(field) = self.focus {
                    let mut value = self.finder.params().field(field).to_string();
                    value.push(c);
                    self.finder.set_field(field, value).await;
                }
            }
            Action::Backspace => {
                if let Focus::Field(field) = self.focus {
                    let mut value = self.finder.params().field(field).to_string();
                    if value.pop().is_some() {
                        self.finder.set_field(field, value).await;
                    }
                }
            }
            Action::Search => self.start_search(),
            Action::Export => self.export(),
            Action::TogglePdf => {
                let only_pdf = !self.finder.params().only_pdf;
                self.finder.set_only_pdf(only_pdf).await;
                self.copy_feedback = None;
                self.clamp_selection();
            }
            Action::MoveUp => self.selected = self.selected.saturating_sub(1),
            Action::MoveDown => {
                self.selected += 1;
                self.clamp_selection();
            }
            Action::CopyCitation => self.copy_citation(),
            Action::ShowLinks => {
                if self.selected < self.visible_count() {
                    self.overlay = Some(Overlay::Links(self.selected));
                }
            }
            Action::CycleTheme => self.theme = self.theme.next(),
            Action::SaveTheme => {
                self.notice = Some(match super::util::save_theme(self.theme.name) {
                    Ok(path) => format!("Theme saved to {}", path.display()),
                    Err(e) => e,
                });
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                if let Some(fb) = &self.copy_feedback
                    && !fb.is_active(Instant::now())
                {
                    self.copy_feedback = None;
                }
            }
            Action::Resize(..) | Action::None => {}
        }
    }

    /// Kick off a fetch on a spawned task. Ignored while one is in flight or
    /// when the query is blank.
    fn start_search(&mut self) {
        let Some(tx) = self.fetch_tx.clone() else {
            return;
        };
        let Some(url) = self.finder.begin_search() else {
            return;
        };
        self.selected = 0;
        self.copy_feedback = None;
        self.notice = None;
        let source = self.finder.source();
        tokio::spawn(async move {
            let result = source.fetch(&url).await;
            let _ = tx.send(result);
        });
    }

    /// Apply a fetch delivered by the event loop.
    pub async fn finish_search(&mut self, result: FetchResult) -> SearchOutcome {
        let outcome = self.finder.complete_search(result).await;
        self.clamp_selection();
        outcome
    }

    fn export(&mut self) {
        self.notice = Some(match self.finder.export_csv(&self.download_dir) {
            Ok(Some(path)) => format!("Saved {}", path.display()),
            Ok(None) => "Nothing to export".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                format!("Export failed: {}", e)
            }
        });
    }

    fn copy_citation(&mut self) {
        let index = self.selected;
        match self.finder.copy_citation(index, self.clipboard.as_mut()) {
            Some(CopyOutcome::Copied(_)) => {
                self.copy_feedback = Some(CopyFeedback::start(index, Instant::now()));
            }
            Some(CopyOutcome::Manual(text)) => self.overlay = Some(Overlay::ManualCopy(text)),
            None => {}
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }
}
