//! Single-line text field built on `tui_input`

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

/// Editable text with a placeholder, a length cap and a blinking cursor
#[derive(Debug, Clone)]
pub struct TextField {
    input: Input,
    placeholder: &'static str,
    char_limit: usize,
    cursor_visible: bool,
}

impl TextField {
    pub fn new(placeholder: &'static str, char_limit: usize) -> Self {
        Self {
            input: Input::default(),
            placeholder,
            char_limit,
            cursor_visible: true,
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input = Input::new(value.into());
    }

    pub fn reset(&mut self) {
        self.input.reset();
        self.cursor_visible = true;
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Apply an editing key. Returns whether the value or cursor changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let KeyCode::Char(_) = key.code {
            let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if plain && self.input.value().chars().count() >= self.char_limit {
                return false;
            }
        }

        self.cursor_visible = true;
        self.input.handle_event(&Event::Key(key)).is_some()
    }

    /// Toggle the cursor blink phase
    pub fn tick(&mut self) {
        self.cursor_visible = !self.cursor_visible;
    }
}
