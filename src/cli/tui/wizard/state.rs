use std::path::PathBuf;

use super::color_picker::ColorPicker;
use super::file_picker::FilePicker;
use super::template_form::TemplateWizard;
use super::text_field::TextField;
use crate::config::{OutputFormat, QrConfig, Settings};
use crate::generator::Bitmap;
use crate::history::HistoryStore;
use crate::templates::ContentType;

/// Number of steps shown in the progress bar
pub const TOTAL_VISIBLE_STEPS: usize = 9;

/// Wizard steps in forward order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    ContentType,
    Url,
    Template,
    Format,
    ForegroundColor,
    BackgroundColor,
    Size,
    Output,
    Confirm,
    Complete,
}

impl Step {
    /// Where `Esc` leads from this step. `branch` is the content type picked
    /// on the first step, which decides whether Format goes back to the free
    /// text step or to the template form.
    pub fn previous(self, branch: ContentType) -> Option<Step> {
        match self {
            Step::ContentType | Step::Complete => None,
            Step::Url | Step::Template => Some(Step::ContentType),
            Step::Format if branch.is_free_text() => Some(Step::Url),
            Step::Format => Some(Step::Template),
            Step::ForegroundColor => Some(Step::Format),
            Step::BackgroundColor => Some(Step::ForegroundColor),
            Step::Size => Some(Step::BackgroundColor),
            Step::Output => Some(Step::Size),
            Step::Confirm => Some(Step::Output),
        }
    }

    /// 1-based position in the progress bar
    pub fn display_number(self) -> usize {
        match self {
            Step::ContentType => 1,
            Step::Url | Step::Template => 2,
            Step::Format => 3,
            Step::ForegroundColor => 4,
            Step::BackgroundColor => 5,
            Step::Size => 6,
            Step::Output => 7,
            Step::Confirm => 8,
            Step::Complete => 9,
        }
    }

    pub fn shows_progress(self) -> bool {
        self != Step::Complete
    }
}

/// What a step handler asks the wizard to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(Step),
    Back,
    Restart,
    Quit,
}

/// Result of feeding a key to a sub-state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Still collecting input
    Active,
    Confirmed(T),
    /// The user backed out with `Esc`
    Cancelled,
}

/// Everything the wizard needs from its surroundings
#[derive(Debug, Clone)]
pub struct WizardContext {
    pub settings: Settings,
    pub home: Option<PathBuf>,
    /// Directory relative output paths resolve against
    pub cwd: PathBuf,
}

impl WizardContext {
    pub fn new(settings: Settings, home: Option<PathBuf>, cwd: PathBuf) -> Self {
        Self { settings, home, cwd }
    }

    /// Directory output paths and the file browser start from
    pub fn output_base(&self) -> PathBuf {
        self.settings.output_base(self.home.as_deref(), &self.cwd)
    }
}

/// Full wizard state
#[derive(Debug)]
pub struct Wizard {
    pub step: Step,
    /// Draft handed to the generator on confirmation
    pub config: QrConfig,

    pub content_type_index: usize,
    pub content_input: TextField,
    pub template: Option<TemplateWizard>,
    pub format_index: usize,
    pub foreground: ColorPicker,
    pub background: ColorPicker,
    pub size_input: TextField,
    pub output_input: TextField,
    pub file_browser_active: bool,
    pub file_picker: FilePicker,

    /// Inline error for the current step
    pub error: Option<String>,
    pub success_path: Option<PathBuf>,
    /// Module grid of the generated code for the completion screen
    pub preview: Option<Bitmap>,

    pub(super) context: WizardContext,
    pub(super) history: Option<HistoryStore>,
    pub(super) should_quit: bool,
}

impl Wizard {
    pub fn new(context: WizardContext) -> Self {
        let config = context
            .settings
            .initial_config(context.home.as_deref(), &context.cwd);
        let format_index = match config.format {
            OutputFormat::Png => 0,
            OutputFormat::Svg => 1,
        };

        Self {
            step: Step::ContentType,
            content_type_index: 0,
            content_input: TextField::new("https://example.com", 2048),
            template: None,
            format_index,
            foreground: ColorPicker::starting_at("#000000", config.foreground),
            background: ColorPicker::starting_at("#FFFFFF", config.background),
            size_input: TextField::new("256", 4),
            output_input: TextField::new("qrcode", 256),
            file_browser_active: false,
            file_picker: FilePicker::new(context.output_base(), context.home.clone()),
            error: None,
            success_path: None,
            preview: None,
            config,
            context,
            history: None,
            should_quit: false,
        }
    }

    /// Record successful generations in `store`
    pub fn with_history(mut self, store: HistoryStore) -> Self {
        self.history = Some(store);
        self
    }

    pub fn content_type(&self) -> ContentType {
        ContentType::ALL[self.content_type_index.min(ContentType::ALL.len() - 1)]
    }

    pub fn selected_format(&self) -> OutputFormat {
        if self.format_index == 0 {
            OutputFormat::Png
        } else {
            OutputFormat::Svg
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.context.settings
    }

    pub fn history(&self) -> Option<&HistoryStore> {
        self.history.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_follows_branch() {
        assert_eq!(Step::Format.previous(ContentType::Url), Some(Step::Url));
        assert_eq!(Step::Format.previous(ContentType::Text), Some(Step::Url));
        assert_eq!(Step::Format.previous(ContentType::WiFi), Some(Step::Template));
        assert_eq!(Step::Template.previous(ContentType::Sms), Some(Step::ContentType));
        assert_eq!(Step::Confirm.previous(ContentType::Url), Some(Step::Output));
    }

    #[test]
    fn test_first_and_last_steps_have_no_predecessor() {
        assert_eq!(Step::ContentType.previous(ContentType::Url), None);
        assert_eq!(Step::Complete.previous(ContentType::Url), None);
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(Step::Url.display_number(), Step::Template.display_number());
        assert_eq!(Step::Complete.display_number(), TOTAL_VISIBLE_STEPS);
        assert!(!Step::Complete.shows_progress());
    }
}
