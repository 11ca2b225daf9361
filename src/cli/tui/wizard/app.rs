use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal, Frame,
};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time;

use super::events::AppEvent;
use super::state::{Outcome, Step, Transition, Wizard};
use super::template_form::TemplateWizard;
use super::theme::Theme;
use crate::config::types::{normalize_output_path, size_in_range, MAX_SIZE, MIN_SIZE};
use crate::generator;
use crate::history::NewEntry;
use crate::Result;

/// Idle time after which a blink tick is emitted
const TICK_INTERVAL: Duration = Duration::from_millis(500);
/// How long the input thread waits for a terminal event before checking
/// whether the wizard has exited
const INPUT_POLL: Duration = Duration::from_millis(250);

/// Main application struct
pub struct App {
    wizard: Wizard,
    theme: Theme,
}

impl App {
    pub fn new(wizard: Wizard) -> Self {
        Self {
            wizard,
            theme: Theme::default(),
        }
    }

    /// Run the application
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        spawn_input_reader(event_tx);

        let result = self.main_loop(&mut terminal, &mut event_rx).await;

        ratatui::restore();
        result
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        event_rx: &mut UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            match time::timeout(TICK_INTERVAL, event_rx.recv()).await {
                Ok(Some(event)) => self.wizard.handle_event(event),
                Ok(None) => break,
                Err(_) => self.wizard.handle_event(AppEvent::Tick),
            }

            if self.wizard.should_quit() {
                break;
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        super::screens::render(frame, &self.wizard, &self.theme);
    }
}

/// Forward terminal events until the receiving side goes away.
fn spawn_input_reader(input_tx: UnboundedSender<AppEvent>) {
    tokio::task::spawn_blocking(move || {
        while !input_tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!("Terminal input error: {}", e);
                    break;
                }
            }
            let sent = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    input_tx.send(AppEvent::Key(key))
                }
                Ok(Event::Resize(width, height)) => input_tx.send(AppEvent::Resize(width, height)),
                Ok(_) => Ok(()),
                Err(e) => {
                    tracing::warn!("Terminal input error: {}", e);
                    break;
                }
            };
            if sent.is_err() {
                break;
            }
        }
    });
}

impl Wizard {
    /// Process one event to completion
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => self.tick(),
            // Layout is recomputed on every draw
            AppEvent::Resize(..) => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.apply(Transition::Quit);
            return;
        }

        let transition = match self.step {
            Step::ContentType => self.handle_content_type_key(key),
            Step::Url => self.handle_url_key(key),
            Step::Template => self.handle_template_key(key),
            Step::Format => self.handle_format_key(key),
            Step::ForegroundColor | Step::BackgroundColor => self.handle_color_key(key),
            Step::Size => self.handle_size_key(key),
            Step::Output => self.handle_output_key(key),
            Step::Confirm => self.handle_confirm_key(key),
            Step::Complete => self.handle_complete_key(key),
        };
        self.apply(transition);
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Goto(step) => {
                tracing::debug!(from = ?self.step, to = ?step, "Wizard step");
                self.error = None;
                self.step = step;
            }
            Transition::Back => {
                if let Some(previous) = self.step.previous(self.content_type()) {
                    tracing::debug!(from = ?self.step, to = ?previous, "Wizard back");
                    self.error = None;
                    self.step = previous;
                    if let (Step::Template, Some(template)) = (previous, self.template.as_mut()) {
                        template.focus_first();
                    }
                }
            }
            Transition::Restart => self.restart(),
            Transition::Quit => self.should_quit = true,
        }
    }

    /// Start over with a fresh draft, keeping the history store
    fn restart(&mut self) {
        tracing::debug!("Wizard restarted");
        let history = self.history.take();
        *self = Wizard::new(self.context.clone());
        self.history = history;
    }

    fn tick(&mut self) {
        match self.step {
            Step::Url => self.content_input.tick(),
            Step::Template => {
                if let Some(template) = self.template.as_mut() {
                    template.tick();
                }
            }
            Step::ForegroundColor => self.foreground.tick(),
            Step::BackgroundColor => self.background.tick(),
            Step::Size => self.size_input.tick(),
            Step::Output if self.file_browser_active => self.file_picker.tick(),
            Step::Output => self.output_input.tick(),
            _ => {}
        }
    }

    fn handle_content_type_key(&mut self, key: KeyEvent) -> Transition {
        let count = crate::templates::ContentType::ALL.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.content_type_index = self.content_type_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.content_type_index + 1 < count {
                    self.content_type_index += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let content_type = self.content_type();
                return match TemplateWizard::new(content_type) {
                    Some(template) => {
                        self.template = Some(template);
                        Transition::Goto(Step::Template)
                    }
                    None => Transition::Goto(Step::Url),
                };
            }
            _ => {}
        }
        Transition::Stay
    }

    fn handle_url_key(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Esc => Transition::Back,
            KeyCode::Enter => {
                let content = self.content_input.value().trim();
                if content.is_empty() {
                    self.error = Some("please enter a URL or text to encode".to_string());
                    return Transition::Stay;
                }
                self.config.content = content.to_string();
                Transition::Goto(Step::Format)
            }
            _ => {
                self.content_input.handle_key(key);
                Transition::Stay
            }
        }
    }

    fn handle_template_key(&mut self, key: KeyEvent) -> Transition {
        let Some(template) = self.template.as_mut() else {
            return Transition::Back;
        };

        match template.handle_key(key) {
            Outcome::Confirmed(payload) => {
                self.config.content = payload;
                Transition::Goto(Step::Format)
            }
            Outcome::Cancelled => Transition::Back,
            Outcome::Active => {
                self.error = template.error().map(|e| e.to_string());
                Transition::Stay
            }
        }
    }

    fn handle_format_key(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Esc => return Transition::Back,
            KeyCode::Left | KeyCode::Char('h') => self.format_index = 0,
            KeyCode::Right | KeyCode::Char('l') => self.format_index = 1,
            KeyCode::Char('1') => self.format_index = 0,
            KeyCode::Char('2') => self.format_index = 1,
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.config.format = self.selected_format();
                let path = self.config.output_path.clone();
                self.config.set_output_path(path);
                return Transition::Goto(Step::ForegroundColor);
            }
            _ => {}
        }
        // Direct picks apply immediately
        self.config.format = self.selected_format();
        Transition::Stay
    }

    fn handle_color_key(&mut self, key: KeyEvent) -> Transition {
        let foreground = self.step == Step::ForegroundColor;
        let picker = if foreground {
            &mut self.foreground
        } else {
            &mut self.background
        };

        match picker.handle_key(key) {
            Ok(Outcome::Confirmed(color)) => {
                if foreground {
                    self.config.foreground = color;
                    Transition::Goto(Step::BackgroundColor)
                } else {
                    self.config.background = color;
                    Transition::Goto(Step::Size)
                }
            }
            Ok(Outcome::Cancelled) => Transition::Back,
            Ok(Outcome::Active) => Transition::Stay,
            Err(message) => {
                self.error = Some(message);
                Transition::Stay
            }
        }
    }

    fn handle_size_key(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Esc => Transition::Back,
            KeyCode::Enter => {
                let input = self.size_input.value().trim();
                if input.is_empty() {
                    self.config.size = self.context.settings.default_size;
                    return Transition::Goto(Step::Output);
                }
                match input.parse::<u32>() {
                    Ok(size) if size_in_range(size) => {
                        self.config.size = size;
                        Transition::Goto(Step::Output)
                    }
                    _ => {
                        self.error = Some(format!(
                            "size must be a number between {} and {}",
                            MIN_SIZE, MAX_SIZE
                        ));
                        Transition::Stay
                    }
                }
            }
            _ => {
                self.size_input.handle_key(key);
                Transition::Stay
            }
        }
    }

    fn handle_output_key(&mut self, key: KeyEvent) -> Transition {
        if self.file_browser_active {
            return self.handle_file_browser_key(key);
        }

        match key.code {
            KeyCode::Esc => Transition::Back,
            KeyCode::Tab => {
                self.file_browser_active = true;
                self.file_picker.refresh();
                Transition::Stay
            }
            KeyCode::Enter => {
                self.config.output_path = normalize_output_path(
                    self.output_input.value(),
                    self.config.format,
                    self.context.home.as_deref(),
                    Some(&self.context.output_base()),
                );
                Transition::Goto(Step::Confirm)
            }
            _ => {
                self.output_input.handle_key(key);
                Transition::Stay
            }
        }
    }

    fn handle_file_browser_key(&mut self, key: KeyEvent) -> Transition {
        if key.code == KeyCode::Tab {
            self.close_file_browser();
            return Transition::Stay;
        }

        match self.file_picker.handle_key(key) {
            Outcome::Confirmed(path) => {
                self.config.set_output_path(path);
                self.close_file_browser();
                Transition::Goto(Step::Confirm)
            }
            Outcome::Cancelled => {
                self.close_file_browser();
                Transition::Stay
            }
            Outcome::Active => Transition::Stay,
        }
    }

    fn close_file_browser(&mut self) {
        self.file_browser_active = false;
        self.file_picker.reset();
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Esc => Transition::Back,
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => self.generate(),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.file_browser_active = false;
                Transition::Goto(Step::ContentType)
            }
            _ => Transition::Stay,
        }
    }

    /// Write the file, then record history and build the preview on a best
    /// effort basis.
    fn generate(&mut self) -> Transition {
        if let Err(e) = generator::generate(&self.config) {
            tracing::warn!("Generation failed: {}", e);
            self.error = Some(e.to_string());
            return Transition::Stay;
        }
        self.success_path = Some(self.config.output_path.clone());

        if self.context.settings.history_enabled {
            if let Some(store) = self.history.as_mut() {
                match store.add(NewEntry::from(&self.config)) {
                    Ok(entry) => tracing::info!(id = entry.id, "Saved to history"),
                    Err(e) => tracing::warn!("Could not save history entry: {}", e),
                }
            }
        }

        self.preview = match generator::module_bitmap(&self.config.content) {
            Ok(bitmap) => Some(bitmap),
            Err(e) => {
                tracing::warn!("Could not build terminal preview: {}", e);
                None
            }
        };

        Transition::Goto(Step::Complete)
    }

    fn handle_complete_key(&mut self, key: KeyEvent) -> Transition {
        match key.code {
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ') => Transition::Quit,
            KeyCode::Char('r') => Transition::Restart,
            _ => Transition::Stay,
        }
    }
}
