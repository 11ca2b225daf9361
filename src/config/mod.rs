//! QR configuration, colors and user settings

pub mod color;
pub mod loader;
pub mod types;

pub use color::{color_to_hex, palette_color, palette_index, palette_name, parse_hex_color, Rgb, PALETTE};
pub use loader::Settings;
pub use types::{
    normalize_output_path, size_in_range, with_format_extension, OutputFormat, QrConfig, DEFAULT_OUTPUT_NAME,
    DEFAULT_SIZE, MAX_SIZE, MIN_SIZE,
};
