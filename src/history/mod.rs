//! Generation history
//!
//! Entries live in `history.json` under the config directory, newest first,
//! trimmed to a fixed maximum. Ids grow monotonically from the largest id
//! still on file.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{color_to_hex, parse_hex_color, OutputFormat, QrConfig};
use crate::io::QrgenPaths;
use crate::{QrgenError, Result};

const CONTENT_PREVIEW_CHARS: usize = 50;

/// One recorded generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u32,
    pub content: String,
    pub format: OutputFormat,
    pub size: u32,
    pub fg_color: String,
    pub bg_color: String,
    pub output_path: PathBuf,
    pub created_at: DateTime<Local>,
}

impl HistoryEntry {
    /// Rebuild the generator config this entry was produced from.
    pub fn to_config(&self) -> Result<QrConfig> {
        Ok(QrConfig {
            content: self.content.clone(),
            format: self.format,
            size: self.size,
            foreground: parse_hex_color(&self.fg_color)?,
            background: parse_hex_color(&self.bg_color)?,
            output_path: self.output_path.clone(),
        })
    }

    /// Single-line summary used by the history table
    pub fn summary(&self) -> String {
        format!(
            "#{:<3}  {}  {:<4}  {:>9}  {:<50}  {}",
            self.id,
            self.created_at.format("%Y-%m-%d %H:%M"),
            self.format.extension().to_uppercase(),
            format!("{}x{}", self.size, self.size),
            content_preview(&self.content),
            self.output_path.display()
        )
    }
}

/// Data recorded for a new entry; id and timestamp are assigned by the store
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub content: String,
    pub format: OutputFormat,
    pub size: u32,
    pub fg_color: String,
    pub bg_color: String,
    pub output_path: PathBuf,
}

impl From<&QrConfig> for NewEntry {
    fn from(config: &QrConfig) -> Self {
        Self {
            content: config.content.clone(),
            format: config.format,
            size: config.size,
            fg_color: color_to_hex(config.foreground),
            bg_color: color_to_hex(config.background),
            output_path: config.output_path.clone(),
        }
    }
}

/// JSON-file backed history
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl HistoryStore {
    /// Open the store in the user's config directory.
    pub fn open(paths: &QrgenPaths, max_entries: usize) -> Result<Self> {
        paths.ensure_directories().map_err(|e| {
            QrgenError::History(format!(
                "failed to create config directory {}: {}",
                paths.config_dir.display(),
                e
            ))
        })?;
        Ok(Self::open_at(paths.history_file(), max_entries))
    }

    /// Open a store backed by `path`. A missing or unreadable file starts
    /// an empty history.
    pub fn open_at(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring unreadable history file {}: {}", path.display(), e);
                }
                Vec::new()
            }
        };

        Self {
            path,
            entries,
            max_entries: max_entries.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a generation and persist the file.
    pub fn add(&mut self, entry: NewEntry) -> Result<HistoryEntry> {
        let id = self.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let record = HistoryEntry {
            id,
            content: entry.content,
            format: entry.format,
            size: entry.size,
            fg_color: entry.fg_color,
            bg_color: entry.bg_color,
            output_path: entry.output_path,
            created_at: Local::now(),
        };

        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(record.clone());
        entries.extend(self.entries.iter().cloned());
        entries.truncate(self.max_entries);
        self.write(&entries)?;
        self.entries = entries;

        tracing::debug!(id, "Recorded history entry");
        Ok(record)
    }

    /// All entries, newest first
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: u32) -> Result<&HistoryEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| QrgenError::History(format!("entry #{} not found", id)))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.write(&[])?;
        self.entries.clear();
        Ok(())
    }

    /// Human-readable table of every entry
    pub fn format_table(&self) -> String {
        if self.entries.is_empty() {
            return "No history entries yet. Generate a QR code to get started!".to_string();
        }

        let mut out = format!(
            "{:<4}  {:<16}  {:<4}  {:>9}  {:<50}  {}\n",
            "ID", "Date", "Fmt", "Size", "Content", "Output"
        );
        out.push_str(&"─".repeat(120));
        out.push('\n');
        for entry in &self.entries {
            out.push_str(&entry.summary());
            out.push('\n');
        }
        out
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QrgenError::History(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        let data = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, data).map_err(|e| {
            QrgenError::History(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

fn load_entries(path: &Path) -> Result<Vec<HistoryEntry>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Flatten line breaks and cut long content for one-line display.
fn content_preview(content: &str) -> String {
    let flat = content.replace("\r\n", " ").replace('\n', " ");
    if flat.chars().count() > CONTENT_PREVIEW_CHARS {
        let cut: String = flat.chars().take(CONTENT_PREVIEW_CHARS - 3).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}
