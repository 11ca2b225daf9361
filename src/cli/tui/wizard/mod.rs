/// Interactive QR code wizard
pub mod app;
pub mod color_picker;
pub mod events;
pub mod file_picker;
pub mod screens;
pub mod state;
pub mod template_form;
pub mod text_field;
pub mod theme;

pub use state::{Outcome, Step, Transition, Wizard, WizardContext};

use crate::Result;

/// Run the wizard until the user quits
pub async fn run(wizard: Wizard) -> Result<()> {
    let app = app::App::new(wizard);
    app.run().await
}
