use std::io::Write;

use owo_colors::OwoColorize;
use paperfinder_core::{ItemAction, ResultsView, Status};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the status line.
pub fn print_status(w: &mut dyn Write, status: &Status, color: ColorMode) -> std::io::Result<()> {
    let text = status.to_string();
    if text.is_empty() {
        return Ok(());
    }
    if color.enabled() {
        match status {
            Status::Failed => writeln!(w, "{}", text.red())?,
            Status::Searching => writeln!(w, "{}", text.dimmed())?,
            _ => writeln!(w, "{}", text.green())?,
        }
    } else {
        writeln!(w, "{}", text)?;
    }
    Ok(())
}

/// Print the rendered result list.
pub fn print_results(
    w: &mut dyn Write,
    view: &ResultsView,
    color: ColorMode,
) -> std::io::Result<()> {
    let items = match view {
        ResultsView::Empty => {
            writeln!(w, "{}", paperfinder_core::render::NO_RESULTS)?;
            return Ok(());
        }
        ResultsView::Items(items) => items,
    };

    for item in items {
        writeln!(w)?;
        if color.enabled() {
            writeln!(w, "{:>3}. {}", item.ordinal.dimmed(), item.title.bold())?;
            writeln!(w, "     {}", item.meta.cyan())?;
        } else {
            writeln!(w, "{:>3}. {}", item.ordinal, item.title)?;
            writeln!(w, "     {}", item.meta)?;
        }
        for action in &item.actions {
            match action {
                ItemAction::CopyCitation { .. } => {}
                _ => {
                    let url = action.url().unwrap_or("");
                    if color.enabled() {
                        writeln!(w, "     {:<17} {}", action.label().dimmed(), url.blue())?;
                    } else {
                        writeln!(w, "     {:<17} {}", action.label(), url)?;
                    }
                }
            }
        }
    }
    writeln!(w)?;
    if color.enabled() {
        writeln!(
            w,
            "{}",
            "Use `paperfinder cite <n>` to copy a citation.".dimmed()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperfinder_core::render::{LinkOptions, render};
    use paperfinder_core::WorkRecord;
    use serde_json::json;

    fn plain(view: &ResultsView) -> String {
        let mut buf = Vec::new();
        print_results(&mut buf, view, ColorMode(false)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_prints_placeholder() {
        assert_eq!(plain(&ResultsView::Empty), "Tidak ada hasil\n");
    }

    #[test]
    fn items_print_meta_and_links() {
        let rec = WorkRecord::new(json!({
            "title": ["Deep Learning"],
            "author": [{"given": "Jane", "family": "Doe"}],
            "issued": {"date-parts": [[2021]]},
            "DOI": "10.1/x"
        }));
        let out = plain(&render(&[&rec], &LinkOptions::default()));
        assert!(out.contains("  1. Deep Learning"));
        assert!(out.contains("Jane Doe • 2021 • Sitasi: 0"));
        assert!(out.contains("https://doi.org/10.1/x"));
        assert!(!out.contains("Salin sitasi"));
    }

    #[test]
    fn blank_status_prints_nothing() {
        let mut buf = Vec::new();
        print_status(&mut buf, &Status::Blank, ColorMode(false)).unwrap();
        assert!(buf.is_empty());
    }
}
