use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::color::{parse_hex_color, Rgb};
use super::types::{size_in_range, OutputFormat, QrConfig, DEFAULT_OUTPUT_NAME, DEFAULT_SIZE};
use crate::{QrgenError, Result};

/// Maximum number of history entries kept by default
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// User defaults read from `config.yaml`
///
/// Every field is optional in the file; missing fields take the built-in
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Size used when the size step is left empty
    pub default_size: u32,
    /// Format preselected on the format step
    pub default_format: OutputFormat,
    /// Hex foreground color used for the initial draft
    pub foreground: String,
    /// Hex background color used for the initial draft
    pub background: String,
    /// Base directory for relative output paths (working directory when unset)
    pub output_dir: Option<PathBuf>,
    /// Whether successful generations are recorded
    pub history_enabled: bool,
    /// Number of history entries to keep
    pub max_history: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_SIZE,
            default_format: OutputFormat::Png,
            foreground: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            output_dir: None,
            history_enabled: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            QrgenError::Config(format!("Failed to read settings file {}: {}", path.display(), e))
        })?;

        let settings: Settings = serde_yaml_ng::from_str(&contents).map_err(|e| {
            QrgenError::Config(format!("Failed to parse settings file {}: {}", path.display(), e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !size_in_range(self.default_size) {
            return Err(QrgenError::Config(format!(
                "default_size {} is outside 64..=4096",
                self.default_size
            )));
        }
        if self.max_history == 0 {
            return Err(QrgenError::Config("max_history must be at least 1".to_string()));
        }
        self.foreground_rgb()?;
        self.background_rgb()?;
        Ok(())
    }

    pub fn foreground_rgb(&self) -> Result<Rgb> {
        parse_hex_color(&self.foreground)
            .map_err(|e| QrgenError::Config(format!("foreground: {}", e)))
    }

    pub fn background_rgb(&self) -> Result<Rgb> {
        parse_hex_color(&self.background)
            .map_err(|e| QrgenError::Config(format!("background: {}", e)))
    }

    /// Directory relative output paths resolve against: `output_dir` with
    /// `~` and relative values expanded, or `cwd` when unset.
    pub fn output_base(&self, home: Option<&Path>, cwd: &Path) -> PathBuf {
        let Some(dir) = &self.output_dir else {
            return cwd.to_path_buf();
        };

        let expanded = match (dir.strip_prefix("~"), home) {
            (Ok(rest), Some(home)) => home.join(rest),
            _ => dir.clone(),
        };
        if expanded.is_relative() {
            cwd.join(expanded)
        } else {
            expanded
        }
    }

    /// Build the initial wizard draft from these settings.
    pub fn initial_config(&self, home: Option<&Path>, cwd: &Path) -> QrConfig {
        let dir = self.output_base(home, cwd);

        let mut config = QrConfig {
            format: self.default_format,
            size: self.default_size,
            foreground: self.foreground_rgb().unwrap_or(Rgb::BLACK),
            background: self.background_rgb().unwrap_or(Rgb::WHITE),
            ..Default::default()
        };
        config.set_output_path(dir.join(DEFAULT_OUTPUT_NAME));
        config
    }
}
