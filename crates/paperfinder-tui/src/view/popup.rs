use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use paperfinder_core::ItemAction;

use super::{centered_rect, truncate};
use crate::app::App;
use crate::theme::Theme;

/// Links of one result, one per line.
pub fn render_links(f: &mut Frame, app: &App, index: usize) {
    let theme = &app.theme;
    let Some(item) = app.finder.view().and_then(|v| v.items().get(index).cloned()) else {
        return;
    };

    let area = f.area();
    let width = area.width.saturating_sub(4).min(90);
    let inner = width.saturating_sub(22) as usize;

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", truncate(&item.title, width.saturating_sub(3) as usize)),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for action in &item.actions {
        if let ItemAction::CopyCitation { .. } = action {
            continue;
        }
        let url = action.url().unwrap_or("");
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<18}", action.label()), Style::default().fg(theme.dim)),
            Span::styled(truncate(url, inner), Style::default().fg(theme.link)),
        ]));
    }
    if lines.len() == 2 {
        lines.push(Line::from(Span::styled(
            " (no links)",
            Style::default().fg(theme.dim),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Esc: close", Style::default().fg(theme.dim))));

    let popup = centered_rect(width, lines.len() as u16 + 2, area);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active))
            .title(" Tautan "),
    );
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// Clipboard unavailable: show the citation so it can be selected by hand.
pub fn render_manual_copy(f: &mut Frame, theme: &Theme, text: &str) {
    let area = f.area();
    let width = area.width.saturating_sub(4).min(80);
    let popup = centered_rect(width, 9, area);

    let lines = vec![
        Line::from(Span::styled(
            " Clipboard unavailable. Select the citation below:",
            Style::default().fg(theme.dim),
        )),
        Line::from(""),
        Line::from(Span::styled(text.to_string(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled(" Esc: close", Style::default().fg(theme.dim))),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.failure))
                .title(" Salin sitasi "),
        );
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
