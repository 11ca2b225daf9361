use crate::{QrgenError, Result};
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "config.yaml";
const HISTORY_FILE: &str = "history.json";
const LOG_FILE: &str = "qrgen.log";

/// Path management for qrgen's per-user files
#[derive(Debug, Clone)]
pub struct QrgenPaths {
    /// Configuration directory (settings and history)
    pub config_dir: PathBuf,
    /// Data directory (log files)
    pub data_dir: PathBuf,
}

impl QrgenPaths {
    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "qrgen").ok_or_else(|| {
            QrgenError::Path("Failed to determine project directories".to_string())
        })?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Root every file under a single directory (used by tests)
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            data_dir: root.to_path_buf(),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    pub fn history_file(&self) -> PathBuf {
        self.config_dir.join(HISTORY_FILE)
    }

    pub fn log_file_name(&self) -> &'static str {
        LOG_FILE
    }

    /// Ensure all directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

/// The current user's home directory, if the platform reports one
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Working directory for relative paths, falling back to home and then `.`
pub fn start_dir() -> PathBuf {
    std::env::current_dir()
        .ok()
        .or_else(home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_paths() {
        let paths = QrgenPaths::rooted_at(Path::new("/tmp/qrgen-test"));
        assert_eq!(paths.settings_file(), PathBuf::from("/tmp/qrgen-test/config.yaml"));
        assert_eq!(paths.history_file(), PathBuf::from("/tmp/qrgen-test/history.json"));
    }
}
