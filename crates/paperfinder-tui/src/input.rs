use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a popup action, respecting input mode.
pub fn map_event(event: &Event, input_mode: InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return map_key_control(key);
            }
            match key.code {
                KeyCode::Esc => return Action::Quit,
                KeyCode::Tab => return Action::FocusNext,
                KeyCode::BackTab => return Action::FocusPrev,
                KeyCode::Enter => return Action::Search,
                _ => {}
            }
            match input_mode {
                InputMode::Editing => map_key_editing(key),
                InputMode::Toggle => map_key_toggle(key),
                InputMode::Browsing => map_key_browsing(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_key_control(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('c') => Action::Quit,
        KeyCode::Char('e') => Action::Export,
        KeyCode::Char('p') => Action::TogglePdf,
        KeyCode::Char('t') => Action::CycleTheme,
        KeyCode::Char('s') => Action::SaveTheme,
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        _ => Action::None,
    }
}

fn map_key_editing(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c) => Action::Input(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Down => Action::FocusNext,
        KeyCode::Up => Action::FocusPrev,
        _ => Action::None,
    }
}

fn map_key_toggle(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(' ') => Action::TogglePdf,
        KeyCode::Down => Action::FocusNext,
        KeyCode::Up => Action::FocusPrev,
        _ => Action::None,
    }
}

fn map_key_browsing(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('y') | KeyCode::Char('c') => Action::CopyCitation,
        KeyCode::Char('o') => Action::ShowLinks,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn letters_type_while_editing_but_act_while_browsing() {
        let y = key(KeyCode::Char('y'));
        assert_eq!(map_event(&y, InputMode::Editing), Action::Input('y'));
        assert_eq!(map_event(&y, InputMode::Browsing), Action::CopyCitation);
        assert_eq!(map_event(&key(KeyCode::Char('o')), InputMode::Browsing), Action::ShowLinks);
    }

    #[test]
    fn control_keys_work_in_every_mode() {
        for mode in [InputMode::Editing, InputMode::Toggle, InputMode::Browsing] {
            assert_eq!(map_event(&ctrl('c'), mode), Action::Quit);
            assert_eq!(map_event(&ctrl('e'), mode), Action::Export);
            assert_eq!(map_event(&ctrl('p'), mode), Action::TogglePdf);
            assert_eq!(map_event(&key(KeyCode::Enter), mode), Action::Search);
            assert_eq!(map_event(&key(KeyCode::Esc), mode), Action::Quit);
        }
    }

    #[test]
    fn tab_cycles_focus() {
        assert_eq!(map_event(&key(KeyCode::Tab), InputMode::Editing), Action::FocusNext);
        assert_eq!(map_event(&key(KeyCode::BackTab), InputMode::Browsing), Action::FocusPrev);
    }

    #[test]
    fn space_toggles_only_on_the_checkbox() {
        let space = key(KeyCode::Char(' '));
        assert_eq!(map_event(&space, InputMode::Toggle), Action::TogglePdf);
        assert_eq!(map_event(&space, InputMode::Editing), Action::Input(' '));
    }
}
