use pretty_assertions::assert_eq;
use qrgen::cli::tui::wizard::{Step, Wizard, WizardContext};
use qrgen::config::{OutputFormat, Rgb, Settings};
use qrgen::templates::ContentType;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

fn wizard_in(dir: &TempDir) -> Wizard {
    let context = WizardContext::new(
        Settings::default(),
        Some(dir.path().to_path_buf()),
        dir.path().to_path_buf(),
    );
    Wizard::new(context)
}

fn press(wizard: &mut Wizard, code: KeyCode) {
    wizard.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(wizard: &mut Wizard, text: &str) {
    for c in text.chars() {
        press(wizard, KeyCode::Char(c));
    }
}

/// Url branch up to the size step with default picks
fn advance_to_size(wizard: &mut Wizard) {
    press(wizard, KeyCode::Enter);
    type_text(wizard, "https://example.com");
    press(wizard, KeyCode::Enter);
    press(wizard, KeyCode::Enter);
    press(wizard, KeyCode::Enter);
    press(wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Size);
}

#[test]
fn test_url_branch_back_navigation() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    assert_eq!(wizard.step, Step::ContentType);

    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Url);

    type_text(&mut wizard, "hello");
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Format);
    assert_eq!(wizard.config.content, "hello");

    press(&mut wizard, KeyCode::Esc);
    assert_eq!(wizard.step, Step::Url);
    assert_eq!(wizard.content_input.value(), "hello");

    press(&mut wizard, KeyCode::Esc);
    assert_eq!(wizard.step, Step::ContentType);
}

#[test]
fn test_template_branch_back_navigation() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);

    press(&mut wizard, KeyCode::Down);
    assert_eq!(wizard.content_type(), ContentType::WiFi);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Template);

    type_text(&mut wizard, "HomeNet");
    press(&mut wizard, KeyCode::Tab);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Format);
    assert_eq!(wizard.config.content, "WIFI:T:WPA;S:HomeNet;P:;;");

    press(&mut wizard, KeyCode::Esc);
    assert_eq!(wizard.step, Step::Template);
    assert_eq!(wizard.template.as_ref().map(|t| t.focus()), Some(0));

    press(&mut wizard, KeyCode::Esc);
    assert_eq!(wizard.step, Step::ContentType);
}

#[test]
fn test_template_validation_shown_inline() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);

    press(&mut wizard, KeyCode::Down);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);

    assert_eq!(wizard.step, Step::Template);
    assert!(wizard.error.as_deref().unwrap_or_default().contains("SSID"));

    type_text(&mut wizard, "x");
    assert_eq!(wizard.error, None);
}

#[test]
fn test_empty_content_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);

    press(&mut wizard, KeyCode::Enter);
    type_text(&mut wizard, "   ");
    press(&mut wizard, KeyCode::Enter);

    assert_eq!(wizard.step, Step::Url);
    assert_eq!(
        wizard.error.as_deref(),
        Some("please enter a URL or text to encode")
    );
}

#[test]
fn test_q_is_text_until_complete() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);

    press(&mut wizard, KeyCode::Char('q'));
    assert!(!wizard.should_quit());

    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Char('q'));
    assert!(!wizard.should_quit());
    assert_eq!(wizard.content_input.value(), "q");
}

#[test]
fn test_ctrl_c_quits_from_any_step() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    press(&mut wizard, KeyCode::Enter);

    wizard.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(wizard.should_quit());
}

#[test]
fn test_format_choice_updates_extension() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    press(&mut wizard, KeyCode::Enter);
    type_text(&mut wizard, "hello");
    press(&mut wizard, KeyCode::Enter);

    press(&mut wizard, KeyCode::Right);
    assert_eq!(wizard.selected_format(), OutputFormat::Svg);
    press(&mut wizard, KeyCode::Enter);

    assert_eq!(wizard.step, Step::ForegroundColor);
    assert_eq!(wizard.config.format, OutputFormat::Svg);
    assert_eq!(
        wizard.config.output_path.extension().and_then(|e| e.to_str()),
        Some("svg")
    );
}

#[test]
fn test_color_steps() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    press(&mut wizard, KeyCode::Enter);
    type_text(&mut wizard, "hello");
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::ForegroundColor);

    // Bad custom hex stays put with an inline error
    press(&mut wizard, KeyCode::Char('c'));
    type_text(&mut wizard, "zz");
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::ForegroundColor);
    assert_eq!(wizard.error.as_deref(), Some("invalid hex color: zz"));

    press(&mut wizard, KeyCode::Backspace);
    press(&mut wizard, KeyCode::Backspace);
    type_text(&mut wizard, "#112233");
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::BackgroundColor);
    assert_eq!(wizard.config.foreground, Rgb::new(0x11, 0x22, 0x33));

    // Esc on the palette goes back a step
    press(&mut wizard, KeyCode::Esc);
    assert_eq!(wizard.step, Step::ForegroundColor);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Size);
    assert_eq!(wizard.config.background, Rgb::WHITE);
}

#[test]
fn test_size_validation() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    advance_to_size(&mut wizard);

    for bad in ["12", "5000", "abc"] {
        type_text(&mut wizard, bad);
        press(&mut wizard, KeyCode::Enter);
        assert_eq!(wizard.step, Step::Size, "{} should be rejected", bad);
        assert_eq!(
            wizard.error.as_deref(),
            Some("size must be a number between 64 and 4096")
        );
        for _ in 0..bad.len() {
            press(&mut wizard, KeyCode::Backspace);
        }
    }

    type_text(&mut wizard, "512");
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Output);
    assert_eq!(wizard.config.size, 512);
    assert_eq!(wizard.error, None);
}

#[test]
fn test_empty_size_uses_default() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    advance_to_size(&mut wizard);

    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Output);
    assert_eq!(wizard.config.size, 256);
}

#[test]
fn test_output_path_resolves_against_cwd() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    advance_to_size(&mut wizard);
    press(&mut wizard, KeyCode::Enter);

    type_text(&mut wizard, "sub/notes.svg");
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Confirm);
    assert_eq!(wizard.config.output_path, dir.path().join("sub").join("notes.png"));

    press(&mut wizard, KeyCode::Esc);
    assert_eq!(wizard.step, Step::Output);
}

#[test]
fn test_file_browser_toggles_with_tab() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    advance_to_size(&mut wizard);
    press(&mut wizard, KeyCode::Enter);

    press(&mut wizard, KeyCode::Tab);
    assert!(wizard.file_browser_active);

    // Esc inside the browser closes it without leaving the step
    press(&mut wizard, KeyCode::Esc);
    assert!(!wizard.file_browser_active);
    assert_eq!(wizard.step, Step::Output);

    press(&mut wizard, KeyCode::Tab);
    press(&mut wizard, KeyCode::Tab);
    assert!(!wizard.file_browser_active);
}

#[test]
fn test_confirm_no_starts_over() {
    let dir = TempDir::new().unwrap();
    let mut wizard = wizard_in(&dir);
    advance_to_size(&mut wizard);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Confirm);

    press(&mut wizard, KeyCode::Char('n'));
    assert_eq!(wizard.step, Step::ContentType);
    assert!(!dir.path().join("qrcode.png").exists());
}

#[test]
fn test_settings_colors_and_output_dir_survive_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        foreground: "#123456".to_string(),
        background: "#FEDCBA".to_string(),
        output_dir: Some(dir.path().join("configured_out")),
        ..Default::default()
    };
    let cwd = dir.path().join("cwd");
    let context = WizardContext::new(settings, None, cwd.clone());
    let mut wizard = Wizard::new(context);

    press(&mut wizard, KeyCode::Enter);
    type_text(&mut wizard, "hello");
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::ForegroundColor);
    assert!(wizard.foreground.custom);

    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Confirm);

    assert_eq!(wizard.config.foreground, Rgb::new(0x12, 0x34, 0x56));
    assert_eq!(wizard.config.background, Rgb::new(0xFE, 0xDC, 0xBA));
    assert_eq!(
        wizard.config.output_path,
        dir.path().join("configured_out").join("qrcode.png")
    );
    assert_ne!(cwd.join("qrcode.png"), wizard.config.output_path);
}

#[test]
fn test_file_browser_starts_in_output_dir() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("codes");
    std::fs::create_dir(&out).unwrap();
    let settings = Settings {
        output_dir: Some(out.clone()),
        ..Default::default()
    };
    let context = WizardContext::new(settings, None, dir.path().to_path_buf());
    let mut wizard = Wizard::new(context);
    advance_to_size(&mut wizard);
    press(&mut wizard, KeyCode::Enter);

    press(&mut wizard, KeyCode::Tab);
    assert_eq!(wizard.file_picker.dir(), out.as_path());
}
