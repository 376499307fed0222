use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use paperfinder_core::ParamField;

use crate::app::{App, Focus};

const LABEL_WIDTH: usize = 14;

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(" Paper Finder  \u{00B7}  {} ", app.theme.name);
    f.render_widget(Paragraph::new(title).style(app.theme.header_style()), area);
}

/// Five parameter inputs and the PDF-only checkbox.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let params = app.finder.params();
    let form_focused = !matches!(app.focus, Focus::Results);

    let mut lines: Vec<Line> = ParamField::all()
        .iter()
        .map(|&field| {
            let focused = app.focus == Focus::Field(field);
            let mut spans = vec![
                Span::styled(
                    format!(" {:<width$}", field.label(), width = LABEL_WIDTH),
                    label_style(app, focused),
                ),
                Span::styled(params.field(field).to_string(), Style::default().fg(theme.text)),
            ];
            if focused {
                spans.push(Span::styled(
                    "\u{2588}",
                    Style::default().fg(theme.active),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let focused = app.focus == Focus::OnlyPdf;
    let check = if params.only_pdf { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {:<width$}", "Hanya PDF", width = LABEL_WIDTH),
            label_style(app, focused),
        ),
        Span::styled(check, Style::default().fg(theme.text)),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(form_focused))
            .title(" Cari "),
    );
    f.render_widget(paragraph, area);
}

fn label_style(app: &App, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(app.theme.active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim)
    }
}
