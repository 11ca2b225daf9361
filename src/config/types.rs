use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::color::Rgb;
use crate::{QrgenError, Result};

/// Smallest accepted image dimension in pixels
pub const MIN_SIZE: u32 = 64;
/// Largest accepted image dimension in pixels
pub const MAX_SIZE: u32 = 4096;
/// Size used when the user leaves the size field empty
pub const DEFAULT_SIZE: u32 = 256;
/// File stem used when the user leaves the output field empty
pub const DEFAULT_OUTPUT_NAME: &str = "qrcode";

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// Canonical file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = QrgenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(QrgenError::Validation(format!(
                "format must be 'png' or 'svg', got '{}'",
                other
            ))),
        }
    }
}

/// Everything the generator needs to emit one QR code file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrConfig {
    /// Payload to encode
    pub content: String,
    pub format: OutputFormat,
    /// Width and height of the output in pixels
    pub size: u32,
    pub foreground: Rgb,
    pub background: Rgb,
    pub output_path: PathBuf,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            content: String::new(),
            format: OutputFormat::Png,
            size: DEFAULT_SIZE,
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
            output_path: PathBuf::from(format!("{}.png", DEFAULT_OUTPUT_NAME)),
        }
    }
}

impl QrConfig {
    /// Check that the draft is complete enough to generate.
    pub fn validate(&self) -> Result<()> {
        if self.content.is_empty() {
            return Err(QrgenError::Validation("content cannot be empty".to_string()));
        }
        if !size_in_range(self.size) {
            return Err(QrgenError::Validation(format!(
                "size must be between {} and {} pixels",
                MIN_SIZE, MAX_SIZE
            )));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(QrgenError::Validation("output path cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Store `path` with its extension forced to the current format.
    pub fn set_output_path(&mut self, path: impl AsRef<Path>) {
        self.output_path = with_format_extension(path.as_ref(), self.format);
    }
}

pub fn size_in_range(size: u32) -> bool {
    (MIN_SIZE..=MAX_SIZE).contains(&size)
}

/// Replace any existing extension of `path` (or append one) with the
/// canonical extension of `format`.
pub fn with_format_extension(path: &Path, format: OutputFormat) -> PathBuf {
    path.with_extension(format.extension())
}

/// Resolve what the user typed on the output step into an absolute path
/// carrying the right extension.
///
/// `~` expands to `home`; relative paths are joined onto `cwd`.
pub fn normalize_output_path(
    input: &str,
    format: OutputFormat,
    home: Option<&Path>,
    cwd: Option<&Path>,
) -> PathBuf {
    let trimmed = input.trim();
    let raw = if trimmed.is_empty() {
        DEFAULT_OUTPUT_NAME
    } else {
        trimmed
    };

    let mut path = match (raw.strip_prefix('~'), home) {
        (Some(rest), Some(home)) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            if rest.is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            }
        }
        _ => PathBuf::from(raw),
    };

    if path.is_relative() {
        if let Some(cwd) = cwd {
            path = cwd.join(path);
        }
    }

    with_format_extension(&path, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extension_appended_when_missing() {
        assert_eq!(
            with_format_extension(Path::new("notes"), OutputFormat::Svg),
            PathBuf::from("notes.svg")
        );
    }

    #[test]
    fn test_extension_replaced_when_present() {
        assert_eq!(
            with_format_extension(Path::new("notes.png"), OutputFormat::Svg),
            PathBuf::from("notes.svg")
        );
        assert_eq!(
            with_format_extension(Path::new("dir.d/notes.jpeg"), OutputFormat::Png),
            PathBuf::from("dir.d/notes.png")
        );
    }

    #[test]
    fn test_set_output_path_uses_current_format() {
        let mut config = QrConfig {
            format: OutputFormat::Svg,
            ..Default::default()
        };
        config.set_output_path("out/code.png");
        assert_eq!(config.output_path, PathBuf::from("out/code.svg"));
    }

    #[test]
    fn test_normalize_relative_against_cwd() {
        let cwd = Path::new("/work");
        let path = normalize_output_path("notes", OutputFormat::Svg, None, Some(cwd));
        assert_eq!(path, PathBuf::from("/work/notes.svg"));
    }

    #[test]
    fn test_normalize_empty_defaults_to_qrcode() {
        let cwd = Path::new("/work");
        let path = normalize_output_path("   ", OutputFormat::Png, None, Some(cwd));
        assert_eq!(path, PathBuf::from("/work/qrcode.png"));
    }

    #[test]
    fn test_normalize_expands_tilde() {
        let home = Path::new("/home/alex");
        let cwd = Path::new("/work");
        let path = normalize_output_path("~/Downloads/myqr", OutputFormat::Png, Some(home), Some(cwd));
        assert_eq!(path, PathBuf::from("/home/alex/Downloads/myqr.png"));
    }

    #[test]
    fn test_normalize_keeps_absolute_paths() {
        let cwd = Path::new("/work");
        let path = normalize_output_path("/tmp/out.svg", OutputFormat::Png, None, Some(cwd));
        assert_eq!(path, PathBuf::from("/tmp/out.png"));
    }

    #[test]
    fn test_validate() {
        let mut config = QrConfig {
            content: "hello".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.size = 63;
        assert!(config.validate().is_err());
        config.size = 4097;
        assert!(config.validate().is_err());
        config.size = 4096;
        assert!(config.validate().is_ok());

        config.content.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert!("gif".parse::<OutputFormat>().is_err());
    }
}
