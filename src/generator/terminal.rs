//! Terminal QR preview using upper half blocks
//!
//! Each character cell shows two vertical modules: the glyph's foreground
//! paints the top half and the cell background paints the bottom half.
//! Colors are fixed black and bright white so the code stays scannable
//! whatever the terminal theme.

use std::fmt::Write as _;

use super::{module_bitmap, Bitmap};
use crate::Result;

/// Upper half block (U+2580)
pub const HALF_BLOCK: char = '▀';

const ANSI_RESET: &str = "\x1b[0m";

/// Terminal color of one half of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Black,
    BrightWhite,
}

impl Shade {
    fn for_module(dark: bool) -> Self {
        if dark {
            Shade::Black
        } else {
            Shade::BrightWhite
        }
    }

    fn ansi_fg(&self) -> u8 {
        match self {
            Shade::Black => 30,
            Shade::BrightWhite => 97,
        }
    }

    fn ansi_bg(&self) -> u8 {
        match self {
            Shade::Black => 40,
            Shade::BrightWhite => 107,
        }
    }
}

/// Colors for the cell covering `top` and `bottom`, as (glyph fg, cell bg).
pub fn cell_shades(top_dark: bool, bottom_dark: bool) -> (Shade, Shade) {
    (Shade::for_module(top_dark), Shade::for_module(bottom_dark))
}

/// Walk the bitmap two rows at a time, yielding one `(top, bottom)` pair per
/// column. A missing bottom row on odd heights counts as light.
pub fn cell_rows(bitmap: &Bitmap) -> impl Iterator<Item = Vec<(bool, bool)>> + '_ {
    bitmap.chunks(2).map(|pair| {
        let top = &pair[0];
        let bottom = pair.get(1);
        top.iter()
            .enumerate()
            .map(|(x, t)| {
                let b = bottom.and_then(|row| row.get(x)).copied().unwrap_or(false);
                (*t, b)
            })
            .collect()
    })
}

/// Render a module grid to an ANSI-colored string.
pub fn render_bitmap_ansi(bitmap: &Bitmap) -> String {
    let cols = bitmap.first().map_or(0, Vec::len);
    let mut out = String::with_capacity((bitmap.len() / 2 + 1) * (cols * 12 + 8));

    for row in cell_rows(bitmap) {
        for (top, bottom) in row {
            let (fg, bg) = cell_shades(top, bottom);
            let _ = write!(out, "\x1b[{};{}m{}", fg.ansi_fg(), bg.ansi_bg(), HALF_BLOCK);
        }
        out.push_str(ANSI_RESET);
        out.push('\n');
    }
    out
}

/// Encode `content` and render it for the terminal.
pub fn render_terminal_preview(content: &str) -> Result<String> {
    let bitmap = module_bitmap(content)?;
    Ok(render_bitmap_ansi(&bitmap))
}
