use super::{load_environment, CommandHandler};
use crate::generator::{self, render_terminal_preview};
use crate::history::HistoryStore;
use crate::Result;

/// Handler for the `regen` command
pub struct RegenCommand {
    pub id: u32,
}

impl RegenCommand {
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    /// Re-generate entry `id` and return the message to print
    pub fn run_with(&self, store: &HistoryStore) -> Result<String> {
        let entry = store.get(self.id)?;
        let config = entry.to_config()?;
        generator::generate(&config)?;

        let mut message = format!("✓ Re-generated QR code: {}", config.output_path.display());
        match render_terminal_preview(&config.content) {
            Ok(preview) => {
                message.push_str("\n\n");
                message.push_str(&preview);
            }
            Err(e) => tracing::warn!("Preview unavailable: {}", e),
        }
        Ok(message)
    }
}

impl CommandHandler for RegenCommand {
    fn execute(&self) -> Result<()> {
        let (paths, settings) = load_environment()?;
        let store = HistoryStore::open(&paths, settings.max_history)?;
        println!("{}", self.run_with(&store)?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "regen"
    }
}
