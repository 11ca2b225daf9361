//! Hex color parsing and the predefined palette

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{QrgenError, Result};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", color_to_hex(*self))
    }
}

/// Named colors offered by the color steps, in display order
pub const PALETTE: [(&str, Rgb); 12] = [
    ("Black", Rgb::new(0, 0, 0)),
    ("White", Rgb::new(255, 255, 255)),
    ("Red", Rgb::new(220, 53, 69)),
    ("Green", Rgb::new(40, 167, 69)),
    ("Blue", Rgb::new(0, 123, 255)),
    ("Purple", Rgb::new(111, 66, 193)),
    ("Orange", Rgb::new(253, 126, 20)),
    ("Cyan", Rgb::new(23, 162, 184)),
    ("Pink", Rgb::new(232, 62, 140)),
    ("Yellow", Rgb::new(255, 193, 7)),
    ("Teal", Rgb::new(32, 201, 151)),
    ("Indigo", Rgb::new(102, 16, 242)),
];

/// Parse `RRGGBB` or `#RRGGBB` into an [`Rgb`].
pub fn parse_hex_color(input: &str) -> Result<Rgb> {
    let hex = input.strip_prefix('#').unwrap_or(input);

    if hex.len() != 6 {
        return Err(QrgenError::Validation(format!(
            "invalid hex color format: {} (expected 6 characters)",
            hex
        )));
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(QrgenError::Validation(format!(
            "invalid hex color: {}",
            input
        )));
    }

    // All six bytes are ASCII hex digits, so slicing on byte offsets is safe
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|e| QrgenError::Validation(format!("invalid color component: {}", e)))
    };

    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Format a color as uppercase `#RRGGBB`.
pub fn color_to_hex(color: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

/// Look up a palette entry by index.
pub fn palette_color(index: usize) -> Option<Rgb> {
    PALETTE.get(index).map(|(_, rgb)| *rgb)
}

/// Name of the palette entry matching `color`, if any.
pub fn palette_name(color: Rgb) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(_, rgb)| *rgb == color)
        .map(|(name, _)| *name)
}

/// Index of the palette entry matching `color`, if any.
pub fn palette_index(color: Rgb) -> Option<usize> {
    PALETTE.iter().position(|(_, rgb)| *rgb == color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(parse_hex_color("#FF8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(parse_hex_color("ff8000").unwrap(), Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_roundtrip_normalizes_to_uppercase_with_hash() {
        for input in ["#a1b2c3", "A1B2C3", "#000000", "ffffff", "#7f7F7f"] {
            let normalized = format!("#{}", input.trim_start_matches('#').to_uppercase());
            assert_eq!(color_to_hex(parse_hex_color(input).unwrap()), normalized);
        }
    }

    #[test]
    fn test_rejects_bad_lengths_and_digits() {
        assert!(parse_hex_color("").is_err());
        assert!(parse_hex_color("#FFF").is_err());
        assert!(parse_hex_color("#FFFFFFF").is_err());
        assert!(parse_hex_color("GGGGGG").is_err());
        assert!(parse_hex_color("+fffff").is_err());
        assert!(parse_hex_color("##FFFFF").is_err());
    }

    #[test]
    fn test_rejects_multibyte_input_without_panicking() {
        assert!(parse_hex_color("ééé").is_err());
    }

    #[test]
    fn test_palette_lookup() {
        assert_eq!(PALETTE.len(), 12);
        assert_eq!(palette_color(0), Some(Rgb::BLACK));
        assert_eq!(palette_color(1), Some(Rgb::WHITE));
        assert_eq!(palette_color(12), None);
        assert_eq!(palette_name(Rgb::new(0, 123, 255)), Some("Blue"));
        assert_eq!(palette_name(Rgb::new(1, 2, 3)), None);
        assert_eq!(palette_index(Rgb::new(102, 16, 242)), Some(11));
    }
}
