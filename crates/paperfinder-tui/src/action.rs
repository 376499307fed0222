/// Everything the popup can be asked to do, produced by [`crate::input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    /// Type a character into the focused field.
    Input(char),
    Backspace,
    Search,
    Export,
    TogglePdf,
    MoveUp,
    MoveDown,
    CopyCitation,
    ShowLinks,
    CycleTheme,
    SaveTheme,
    Tick,
    Resize(u16, u16),
    None,
}
