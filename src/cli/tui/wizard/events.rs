use ratatui::crossterm::event::KeyEvent;

/// All possible events in the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),

    // Cursor blink, emitted when no input arrives for a while
    Tick,
}
