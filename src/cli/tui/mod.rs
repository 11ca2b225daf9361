/// Terminal User Interface module for interactive commands
pub mod wizard;

use crate::history::HistoryStore;
use crate::Result;
use wizard::{Wizard, WizardContext};

/// Run the interactive QR code wizard
pub async fn run_wizard(context: WizardContext, history: Option<HistoryStore>) -> Result<()> {
    let mut wizard = Wizard::new(context);
    if let Some(store) = history {
        wizard = wizard.with_history(store);
    }
    wizard::run(wizard).await
}
