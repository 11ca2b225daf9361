//! QR code file generation
//!
//! Encoding is delegated to the `qrcode` crate; this module turns the module
//! grid into a PNG (through `image`) or a hand-written SVG document.

pub mod terminal;

use image::{ImageFormat, RgbImage};
use qrcode::{Color, EcLevel, QrCode};
use std::fmt::Write as _;
use std::fs;

use crate::config::{OutputFormat, QrConfig, Rgb};
use crate::{QrgenError, Result};

pub use terminal::{render_bitmap_ansi, render_terminal_preview};

/// Light modules added on every side of the symbol
pub const QUIET_ZONE: usize = 4;

/// Square grid of modules, `true` for dark, quiet zone included
pub type Bitmap = Vec<Vec<bool>>;

/// Encode `content` at error-correction level M and return its module grid
/// surrounded by the quiet zone.
pub fn module_bitmap(content: &str) -> Result<Bitmap> {
    if content.is_empty() {
        return Err(QrgenError::Validation("content cannot be empty".to_string()));
    }

    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M)?;
    let width = code.width();
    let total = width + 2 * QUIET_ZONE;

    let mut bitmap = vec![vec![false; total]; total];
    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            bitmap[i / width + QUIET_ZONE][i % width + QUIET_ZONE] = true;
        }
    }
    Ok(bitmap)
}

/// Write the QR code described by `config` to `config.output_path`.
///
/// Parent directories are created as needed.
pub fn generate(config: &QrConfig) -> Result<()> {
    config.validate()?;

    if let Some(parent) = config.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                QrgenError::Path(format!(
                    "failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let bitmap = module_bitmap(&config.content)?;

    match config.format {
        OutputFormat::Png => {
            let image = render_png(&bitmap, config.size, config.foreground, config.background);
            image.save_with_format(&config.output_path, ImageFormat::Png)?;
        }
        OutputFormat::Svg => {
            let svg = render_svg(&bitmap, config.size, config.foreground, config.background);
            fs::write(&config.output_path, svg)?;
        }
    }

    tracing::info!(
        path = %config.output_path.display(),
        format = %config.format,
        size = config.size,
        "Generated QR code"
    );
    Ok(())
}

/// Scale the module grid to exactly `size`×`size` pixels.
pub fn render_png(bitmap: &Bitmap, size: u32, foreground: Rgb, background: Rgb) -> RgbImage {
    let modules = bitmap.len();
    let fg = image::Rgb([foreground.r, foreground.g, foreground.b]);
    let bg = image::Rgb([background.r, background.g, background.b]);

    RgbImage::from_fn(size, size, |x, y| {
        if modules == 0 {
            return bg;
        }
        let mx = x as usize * modules / size as usize;
        let my = y as usize * modules / size as usize;
        if bitmap[my][mx] {
            fg
        } else {
            bg
        }
    })
}

/// One background rect plus one rect per dark module.
pub fn render_svg(bitmap: &Bitmap, size: u32, foreground: Rgb, background: Rgb) -> String {
    let modules = bitmap.len().max(1);
    let module_size = f64::from(size) / modules as f64;

    let mut svg = String::new();
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="0 0 {size} {size}" width="{size}" height="{size}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        svg_color(background)
    );
    let _ = writeln!(svg, r#"  <g fill="{}">"#, svg_color(foreground));

    for (y, row) in bitmap.iter().enumerate() {
        for (x, dark) in row.iter().enumerate() {
            if *dark {
                let _ = writeln!(
                    svg,
                    r#"    <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
                    x as f64 * module_size,
                    y as f64 * module_size,
                    module_size,
                    module_size
                );
            }
        }
    }

    svg.push_str("  </g>\n</svg>");
    svg
}

fn svg_color(color: Rgb) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, name: &str, format: OutputFormat) -> QrConfig {
        QrConfig {
            content: "https://example.com".to_string(),
            format,
            output_path: dir.path().join(name),
            ..Default::default()
        }
    }

    #[test]
    fn test_bitmap_has_quiet_zone() {
        let bitmap = module_bitmap("hello").unwrap();
        let n = bitmap.len();
        // Version 1 symbol is 21 modules wide
        assert_eq!(n, 21 + 2 * QUIET_ZONE);
        assert!(bitmap.iter().all(|row| row.len() == n));
        assert!(bitmap[0].iter().all(|dark| !dark));
        assert!(bitmap[n - 1].iter().all(|dark| !dark));
        // Top-left finder pattern corner
        assert!(bitmap[QUIET_ZONE][QUIET_ZONE]);
    }

    #[test]
    fn test_bitmap_rejects_empty_content() {
        assert!(module_bitmap("").is_err());
    }

    #[test]
    fn test_png_has_requested_dimensions() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, "nested/dir/code.png", OutputFormat::Png);
        config.size = 300;
        generate(&config).unwrap();

        let image = image::open(&config.output_path).unwrap();
        assert_eq!((image.width(), image.height()), (300, 300));
    }

    #[test]
    fn test_png_uses_configured_colors() {
        let bitmap = module_bitmap("hello").unwrap();
        let fg = Rgb::new(10, 20, 30);
        let bg = Rgb::new(200, 210, 220);
        let image = render_png(&bitmap, 290, fg, bg);

        // Corner pixel sits in the quiet zone
        assert_eq!(image.get_pixel(0, 0).0, [200, 210, 220]);
        // First module of the finder pattern: 290 / 29 = 10 px per module
        assert_eq!(image.get_pixel(45, 45).0, [10, 20, 30]);
    }

    #[test]
    fn test_svg_structure() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, "code.svg", OutputFormat::Svg);
        generate(&config).unwrap();

        let svg = fs::read_to_string(&config.output_path).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 256 256""#));
        assert!(svg.contains(r#"<rect width="100%" height="100%" fill="rgb(255,255,255)"/>"#));
        assert!(svg.contains(r#"<g fill="rgb(0,0,0)">"#));
        assert!(svg.trim_end().ends_with("</svg>"));

        let bitmap = module_bitmap(&config.content).unwrap();
        let dark = bitmap.iter().flatten().filter(|d| **d).count();
        let rects = svg.matches("<rect ").count();
        assert_eq!(rects, dark + 1);
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, "code.png", OutputFormat::Png);
        config.size = 10;
        assert!(matches!(generate(&config), Err(QrgenError::Validation(_))));
        assert!(!config.output_path.exists());
    }
}
