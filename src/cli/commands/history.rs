use super::{load_environment, CommandHandler};
use crate::history::HistoryStore;
use crate::Result;

/// Handler for the `history` command
pub struct HistoryCommand {
    pub clear: bool,
}

impl HistoryCommand {
    pub fn new(clear: bool) -> Self {
        Self { clear }
    }

    /// Print the table or clear the store
    pub fn run_with(&self, store: &mut HistoryStore) -> Result<String> {
        if self.clear {
            store.clear()?;
            tracing::info!("Cleared history at {}", store.path().display());
            return Ok("✓ History cleared.".to_string());
        }
        Ok(store.format_table())
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(&self) -> Result<()> {
        let (paths, settings) = load_environment()?;
        let mut store = HistoryStore::open(&paths, settings.max_history)?;
        println!("{}", self.run_with(&mut store)?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QrConfig;
    use crate::history::NewEntry;
    use tempfile::TempDir;

    #[test]
    fn test_clear_empties_store() {
        let dir = TempDir::new().unwrap();
        let mut store = HistoryStore::open_at(dir.path().join("history.json"), 50);
        let config = QrConfig {
            content: "hello".to_string(),
            ..QrConfig::default()
        };
        store.add(NewEntry::from(&config)).unwrap();

        let message = HistoryCommand::new(true).run_with(&mut store).unwrap();
        assert!(message.contains("cleared"));
        assert!(store.list().is_empty());

        let table = HistoryCommand::new(false).run_with(&mut store).unwrap();
        assert!(table.starts_with("No history entries yet"));
    }
}
