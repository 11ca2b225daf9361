//! Directory browser for the output step
//!
//! Lists the current directory (parent link first, then directories, then
//! files, hidden entries skipped) and lets the user pick an existing file or
//! type a new name inside the browsed directory.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::state::Outcome;
use super::text_field::TextField;

/// Rows shown at once
pub const MAX_VISIBLE: usize = 12;

const PARENT_ENTRY: &str = "..";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Display name, lossily converted to UTF-8
    pub name: String,
    /// Name as stored on disk, used to build paths
    pub file_name: OsString,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_ENTRY
    }
}

#[derive(Debug, Clone)]
pub struct FilePicker {
    dir: PathBuf,
    entries: Vec<FileEntry>,
    cursor: usize,
    offset: usize,
    error: Option<String>,
    name_input: TextField,
    name_mode: bool,
    home: Option<PathBuf>,
}

impl FilePicker {
    /// Start browsing at `start`.
    pub fn new(start: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        let start = start.into();
        let dir = std::path::absolute(&start).unwrap_or(start);
        let mut picker = Self {
            dir,
            entries: Vec::new(),
            cursor: 0,
            offset: 0,
            error: None,
            name_input: TextField::new("myqrcode", 256),
            name_mode: false,
            home,
        };
        picker.refresh();
        picker
    }

    /// Reload the listing of the current directory.
    pub fn refresh(&mut self) {
        self.cursor = 0;
        self.offset = 0;
        match list_entries(&self.dir) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                tracing::debug!("Cannot list {}: {}", self.dir.display(), e);
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    /// Leave name mode and clear the typed name
    pub fn reset(&mut self) {
        self.name_mode = false;
        self.name_input.reset();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome<PathBuf> {
        if self.name_mode {
            self.handle_name_key(key)
        } else {
            self.handle_browse_key(key)
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Outcome<PathBuf> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    if self.cursor < self.offset {
                        self.offset = self.cursor;
                    }
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.entries.len() {
                    self.cursor += 1;
                    if self.cursor >= self.offset + MAX_VISIBLE {
                        self.offset = self.cursor + 1 - MAX_VISIBLE;
                    }
                }
            }
            KeyCode::Enter => {
                let Some(entry) = self.entries.get(self.cursor).cloned() else {
                    return Outcome::Active;
                };
                if entry.is_parent() {
                    self.go_to_parent();
                } else if entry.is_dir {
                    let next = self.dir.join(&entry.file_name);
                    self.navigate_to(next);
                } else {
                    return Outcome::Confirmed(self.dir.join(&entry.file_name));
                }
            }
            KeyCode::Char('n') => {
                self.name_mode = true;
                self.name_input.reset();
            }
            KeyCode::Char('~') => {
                if let Some(home) = self.home.clone() {
                    self.navigate_to(home);
                }
            }
            KeyCode::Backspace | KeyCode::Delete => self.go_to_parent(),
            KeyCode::Esc => return Outcome::Cancelled,
            _ => {}
        }
        Outcome::Active
    }

    fn handle_name_key(&mut self, key: KeyEvent) -> Outcome<PathBuf> {
        match key.code {
            KeyCode::Enter => {
                let name = self.name_input.value().trim();
                if name.is_empty() {
                    return Outcome::Active;
                }
                Outcome::Confirmed(self.dir.join(name))
            }
            KeyCode::Esc => {
                self.name_mode = false;
                Outcome::Active
            }
            _ => {
                self.name_input.handle_key(key);
                Outcome::Active
            }
        }
    }

    fn go_to_parent(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.navigate_to(parent);
        }
    }

    fn navigate_to(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.name_mode = false;
        self.refresh();
    }

    pub fn tick(&mut self) {
        if self.name_mode {
            self.name_input.tick();
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_name_mode(&self) -> bool {
        self.name_mode
    }

    pub fn name_input(&self) -> &TextField {
        &self.name_input
    }

    /// Entries inside the scroll window, with their absolute indices
    pub fn visible_entries(&self) -> impl Iterator<Item = (usize, &FileEntry)> {
        self.entries
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(MAX_VISIBLE)
    }

    pub fn has_more_above(&self) -> bool {
        self.offset > 0
    }

    pub fn has_more_below(&self) -> bool {
        self.offset + MAX_VISIBLE < self.entries.len()
    }

    /// Current directory with the home prefix shortened to `~`
    pub fn display_dir(&self) -> String {
        if let Some(home) = &self.home {
            if let Ok(rest) = self.dir.strip_prefix(home) {
                if rest.as_os_str().is_empty() {
                    return "~".to_string();
                }
                return format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display());
            }
        }
        self.dir.display().to_string()
    }
}

/// Read `dir` into picker order: `..` unless at a filesystem root, then
/// directories, then files, each sorted by name. Dotfiles are skipped.
pub fn list_entries(dir: &Path) -> io::Result<Vec<FileEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        // Follow symlinks so linked directories can be entered
        let is_dir = entry.path().is_dir();
        let item = FileEntry {
            name,
            file_name,
            is_dir,
        };
        if is_dir {
            dirs.push(item);
        } else {
            files.push(item);
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if dir.parent().is_some() {
        entries.push(FileEntry {
            name: PARENT_ENTRY.to_string(),
            file_name: OsString::from(PARENT_ENTRY),
            is_dir: true,
        });
    }
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}
