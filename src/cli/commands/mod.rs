pub mod history;
pub mod regen;
pub mod run;
pub mod update;

use crate::config::Settings;
use crate::io::QrgenPaths;
use crate::Result;

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command
    fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Resolve the per-user paths and load settings from them
pub fn load_environment() -> Result<(QrgenPaths, Settings)> {
    let paths = QrgenPaths::new()?;
    let settings = Settings::load(&paths.settings_file())?;
    Ok((paths, settings))
}

/// Runtime for commands that need async I/O
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(rt)
}
