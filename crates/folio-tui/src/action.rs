/// Everything the surface can be asked to do, decoded from terminal input or
/// produced by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    GoTop,
    GoBottom,
    /// Pointer motion with no other effect.
    PointerMoved,
    ClickAt(u16, u16),
    ActivateAffordance,
    FocusForm,
    NextField,
    PrevField,
    /// Leave the form (or close an overlay).
    NavigateBack,
    TextInput(char),
    Backspace,
    /// Enter inside the form: next field, or submit from the last one.
    Confirm,
    Submit,
    ToggleHelp,
    Resize(u16, u16),
    Tick,
    None,
}

impl Action {
    /// Whether this action stems from user interaction and so counts as
    /// activity for the idle monitor.
    pub fn is_activity(&self) -> bool {
        !matches!(self, Action::Tick | Action::Resize(..) | Action::None)
    }
}
