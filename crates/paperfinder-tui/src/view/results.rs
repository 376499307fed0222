use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use paperfinder_core::{ItemAction, ResultsView, Status};

use super::{spinner_char, truncate};
use crate::app::{App, Focus};

pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let status = app.finder.session().status();
    let mut spans = Vec::new();
    if *status == Status::Searching {
        spans.push(Span::styled(
            format!(" {} ", spinner_char(app.tick)),
            Style::default().fg(app.theme.spinner),
        ));
    } else {
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        status.to_string(),
        Style::default().fg(app.theme.status_color(status)),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The result area: cleared before the first render and while searching.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(app.focus == Focus::Results))
        .title(" Hasil ");

    let items = match app.finder.view() {
        None => {
            f.render_widget(block, area);
            return;
        }
        Some(ResultsView::Empty) => {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                format!(" {}", paperfinder_core::render::NO_RESULTS),
                Style::default().fg(theme.dim),
            )))
            .block(block);
            f.render_widget(placeholder, area);
            return;
        }
        Some(ResultsView::Items(items)) => items,
    };

    let width = area.width.saturating_sub(6) as usize;
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let title = Line::from(vec![
                Span::styled(
                    format!("{:>3}. ", item.ordinal),
                    Style::default().fg(theme.dim),
                ),
                Span::styled(
                    truncate(&item.title, width),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ]);
            let meta = Line::from(Span::styled(
                format!("     {}", truncate(&item.meta, width)),
                Style::default().fg(theme.dim),
            ));
            let mut controls = vec![Span::raw("     ")];
            for action in &item.actions {
                let (label, style) = match action {
                    ItemAction::CopyCitation { index } => {
                        (app.copy_label(*index), Style::default().fg(theme.success))
                    }
                    _ => (action.label(), Style::default().fg(theme.link)),
                };
                controls.push(Span::styled(format!("[{}]", label), style));
                controls.push(Span::raw(" "));
            }
            ListItem::new(vec![title, meta, Line::from(controls)])
        })
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(theme.highlight_style());
    let mut state = ListState::default();
    if app.focus == Focus::Results {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}
