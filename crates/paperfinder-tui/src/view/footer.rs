use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, InputMode};

/// Key hints for the current input mode, or the latest notice.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {}", notice),
            Style::default().fg(app.theme.active),
        )),
        None => Line::from(Span::raw(hints(app.input_mode()))),
    };
    f.render_widget(Paragraph::new(line).style(app.theme.footer_style()), area);
}

fn hints(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Editing => {
            " Enter:search  Tab:next  ^P:pdf only  ^E:export csv  ^T:theme  Esc:quit"
        }
        InputMode::Toggle => " Space:toggle  Enter:search  Tab:next  ^E:export csv  Esc:quit",
        InputMode::Browsing => {
            " j/k:move  y:copy citation  o:links  ^P:pdf only  ^E:export csv  Esc:quit"
        }
    }
}
