use super::CommandHandler;
use crate::updater::Updater;
use crate::Result;

/// Version baked in at build time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handler for `update` and `check-update`
pub struct UpdateCommand {
    /// Only report, do not install
    pub check_only: bool,
}

impl UpdateCommand {
    pub fn new(check_only: bool) -> Self {
        Self { check_only }
    }

    async fn run(&self) -> Result<()> {
        let updater = Updater::new()?;
        println!("Checking for updates...");

        if self.check_only {
            let check = updater.check_for_update(VERSION).await?;
            if check.update_available {
                println!(
                    "Update available: v{} → v{}\nRun 'qrgen update' to update.",
                    check.current, check.latest
                );
            } else {
                println!("You're up to date (v{}).", check.current);
            }
            return Ok(());
        }

        let installed = updater.self_update(VERSION).await?;
        tracing::info!("Updated to v{}", installed);
        println!("Successfully updated to v{}!", installed);
        Ok(())
    }
}

impl CommandHandler for UpdateCommand {
    fn execute(&self) -> Result<()> {
        super::runtime()?.block_on(self.run())
    }

    fn name(&self) -> &'static str {
        if self.check_only {
            "check-update"
        } else {
            "update"
        }
    }
}
