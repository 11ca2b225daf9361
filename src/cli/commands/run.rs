use super::CommandHandler;
use crate::Result;

/// Handler for the interactive wizard
pub struct RunCommand;

impl RunCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RunCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tui")]
impl CommandHandler for RunCommand {
    fn execute(&self) -> Result<()> {
        use crate::cli::tui::{self, wizard::WizardContext};
        use crate::history::HistoryStore;
        use crate::io::paths::{home_dir, start_dir};

        let (paths, settings) = super::load_environment()?;

        // History is best effort; the wizard works without it
        let history = if settings.history_enabled {
            match HistoryStore::open(&paths, settings.max_history) {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!("History disabled for this session: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let context = WizardContext::new(settings, home_dir(), start_dir());
        tracing::debug!("Starting wizard in {}", context.cwd.display());

        super::runtime()?.block_on(tui::run_wizard(context, history))
    }

    fn name(&self) -> &'static str {
        "run"
    }
}

#[cfg(not(feature = "tui"))]
impl CommandHandler for RunCommand {
    fn execute(&self) -> Result<()> {
        Err(crate::QrgenError::Config(
            "this build has no interactive wizard, rebuild with the `tui` feature".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "run"
    }
}
