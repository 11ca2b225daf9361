//! Palette list with a custom hex entry mode

use ratatui::crossterm::event::{KeyCode, KeyEvent};

use super::state::Outcome;
use super::text_field::TextField;
use crate::config::{color_to_hex, palette_index, parse_hex_color, Rgb, PALETTE};

#[derive(Debug, Clone)]
pub struct ColorPicker {
    /// Highlighted palette entry
    pub index: usize,
    /// Whether the hex input is active instead of the palette
    pub custom: bool,
    pub input: TextField,
}

impl ColorPicker {
    pub fn new(placeholder: &'static str, index: usize) -> Self {
        Self {
            index: index.min(PALETTE.len() - 1),
            custom: false,
            input: TextField::new(placeholder, 7),
        }
    }

    /// Picker preselecting `color`. A color outside the palette opens the
    /// hex input with its value filled in.
    pub fn starting_at(placeholder: &'static str, color: Rgb) -> Self {
        match palette_index(color) {
            Some(index) => Self::new(placeholder, index),
            None => {
                let mut picker = Self::new(placeholder, 0);
                picker.custom = true;
                picker.input.set_value(color_to_hex(color));
                picker
            }
        }
    }

    /// Feed a key to the picker.
    ///
    /// `Err` carries an inline message for an unparsable hex value; the picker
    /// stays in custom mode so the user can fix it.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Outcome<Rgb>, String> {
        if self.custom {
            return self.handle_custom_key(key);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.index = self.index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.index + 1 < PALETTE.len() {
                    self.index += 1;
                }
            }
            KeyCode::Char('c') => {
                self.custom = true;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                return Ok(Outcome::Confirmed(PALETTE[self.index].1));
            }
            KeyCode::Esc => return Ok(Outcome::Cancelled),
            _ => {}
        }
        Ok(Outcome::Active)
    }

    fn handle_custom_key(&mut self, key: KeyEvent) -> Result<Outcome<Rgb>, String> {
        match key.code {
            KeyCode::Enter => {
                let hex = self.input.value().trim().to_string();
                if hex.is_empty() {
                    self.leave_custom();
                    return Ok(Outcome::Active);
                }
                match parse_hex_color(&hex) {
                    Ok(color) => Ok(Outcome::Confirmed(color)),
                    Err(_) => Err(format!("invalid hex color: {}", hex)),
                }
            }
            KeyCode::Esc => {
                self.leave_custom();
                Ok(Outcome::Active)
            }
            _ => {
                self.input.handle_key(key);
                Ok(Outcome::Active)
            }
        }
    }

    /// Back to the palette with the first entry highlighted
    fn leave_custom(&mut self) {
        self.custom = false;
        self.index = 0;
    }

    pub fn tick(&mut self) {
        if self.custom {
            self.input.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_palette_navigation_clamps() {
        let mut picker = ColorPicker::new("#000000", 0);
        picker.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(picker.index, 0);
        for _ in 0..20 {
            picker.handle_key(key(KeyCode::Char('j'))).unwrap();
        }
        assert_eq!(picker.index, PALETTE.len() - 1);
    }

    #[test]
    fn test_palette_selection() {
        let mut picker = ColorPicker::new("#000000", 2);
        let outcome = picker.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(outcome, Outcome::Confirmed(Rgb::new(220, 53, 69)));
    }

    #[test]
    fn test_custom_hex() {
        let mut picker = ColorPicker::new("#000000", 3);
        picker.handle_key(key(KeyCode::Char('c'))).unwrap();
        assert!(picker.custom);
        for c in "zz".chars() {
            picker.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            Err("invalid hex color: zz".to_string())
        );
        assert!(picker.custom);

        picker.input.set_value("#12ab34");
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            Ok(Outcome::Confirmed(Rgb::new(0x12, 0xab, 0x34)))
        );
    }

    #[test]
    fn test_empty_custom_returns_to_first_palette_entry() {
        let mut picker = ColorPicker::new("#000000", 5);
        picker.handle_key(key(KeyCode::Char('c'))).unwrap();
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), Ok(Outcome::Active));
        assert!(!picker.custom);
        assert_eq!(picker.index, 0);
    }

    #[test]
    fn test_starting_at_palette_and_custom_colors() {
        let mut picker = ColorPicker::starting_at("#FFFFFF", Rgb::WHITE);
        assert!(!picker.custom);
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), Ok(Outcome::Confirmed(Rgb::WHITE)));

        let mut picker = ColorPicker::starting_at("#FFFFFF", Rgb::new(0xFE, 0xDC, 0xBA));
        assert!(picker.custom);
        assert_eq!(picker.input.value(), "#FEDCBA");
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            Ok(Outcome::Confirmed(Rgb::new(0xFE, 0xDC, 0xBA)))
        );
    }

    #[test]
    fn test_esc_leaves_custom_before_cancelling() {
        let mut picker = ColorPicker::new("#000000", 0);
        picker.handle_key(key(KeyCode::Char('c'))).unwrap();
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), Ok(Outcome::Active));
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), Ok(Outcome::Cancelled));
    }
}
