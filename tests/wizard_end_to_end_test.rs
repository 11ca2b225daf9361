use pretty_assertions::assert_eq;
use qrgen::cli::tui::wizard::{Step, Wizard, WizardContext};
use qrgen::config::{OutputFormat, Settings};
use qrgen::history::HistoryStore;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs;
use tempfile::TempDir;

fn press(wizard: &mut Wizard, code: KeyCode) {
    wizard.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(wizard: &mut Wizard, text: &str) {
    for c in text.chars() {
        press(wizard, KeyCode::Char(c));
    }
}

struct Fixture {
    _root: TempDir,
    cwd: std::path::PathBuf,
    history_file: std::path::PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let cwd = root.path().join("work");
        fs::create_dir(&cwd).unwrap();
        let history_file = root.path().join("config").join("history.json");
        Self {
            cwd,
            history_file,
            _root: root,
        }
    }

    fn wizard(&self) -> Wizard {
        let context = WizardContext::new(Settings::default(), None, self.cwd.clone());
        Wizard::new(context).with_history(HistoryStore::open_at(&self.history_file, 50))
    }
}

#[test]
fn test_url_to_png_with_defaults() {
    let fixture = Fixture::new();
    let mut wizard = fixture.wizard();

    press(&mut wizard, KeyCode::Enter); // URL
    type_text(&mut wizard, "https://example.com");
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter); // PNG
    press(&mut wizard, KeyCode::Enter); // Black
    press(&mut wizard, KeyCode::Enter); // White
    press(&mut wizard, KeyCode::Enter); // Default size
    type_text(&mut wizard, "qrcode");
    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Confirm);

    press(&mut wizard, KeyCode::Enter);
    assert_eq!(wizard.step, Step::Complete);
    assert_eq!(wizard.error, None);

    let expected = fixture.cwd.join("qrcode.png");
    assert_eq!(wizard.success_path.as_deref(), Some(expected.as_path()));

    let image = image::open(&expected).unwrap();
    assert_eq!((image.width(), image.height()), (256, 256));

    // Preview grid is square with the quiet zone
    let preview = wizard.preview.as_ref().unwrap();
    assert_eq!(preview.len(), preview[0].len());
    assert!(!preview[0][0]);

    // Entry is persisted to disk
    let store = HistoryStore::open_at(&fixture.history_file, 50);
    assert_eq!(store.list().len(), 1);
    let entry = &store.list()[0];
    assert_eq!(entry.id, 1);
    assert_eq!(entry.content, "https://example.com");
    assert_eq!(entry.format, OutputFormat::Png);
    assert_eq!(entry.fg_color, "#000000");
    assert_eq!(entry.bg_color, "#FFFFFF");
    assert_eq!(entry.output_path, expected);
}

#[test]
fn test_restart_keeps_history_and_quits_from_complete() {
    let fixture = Fixture::new();
    let mut wizard = fixture.wizard();

    for round in 1..=2 {
        press(&mut wizard, KeyCode::Enter);
        type_text(&mut wizard, &format!("round {}", round));
        for _ in 0..5 {
            press(&mut wizard, KeyCode::Enter);
        }
        type_text(&mut wizard, &format!("code{}", round));
        press(&mut wizard, KeyCode::Enter);
        press(&mut wizard, KeyCode::Enter);
        assert_eq!(wizard.step, Step::Complete);

        if round == 1 {
            press(&mut wizard, KeyCode::Char('r'));
            assert_eq!(wizard.step, Step::ContentType);
            assert_eq!(wizard.content_input.value(), "");
            assert!(wizard.success_path.is_none());
        }
    }

    let ids: Vec<u32> = wizard.history().unwrap().list().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 1]);

    press(&mut wizard, KeyCode::Char('q'));
    assert!(wizard.should_quit());
}

#[test]
fn test_svg_via_file_browser() {
    let fixture = Fixture::new();
    let mut wizard = fixture.wizard();

    press(&mut wizard, KeyCode::Enter);
    type_text(&mut wizard, "hello svg");
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Right); // SVG
    for _ in 0..4 {
        press(&mut wizard, KeyCode::Enter);
    }
    assert_eq!(wizard.step, Step::Output);

    press(&mut wizard, KeyCode::Tab);
    assert_eq!(wizard.file_picker.dir(), fixture.cwd.as_path());
    press(&mut wizard, KeyCode::Char('n'));
    type_text(&mut wizard, "picked");
    press(&mut wizard, KeyCode::Enter);

    assert_eq!(wizard.step, Step::Confirm);
    assert!(!wizard.file_browser_active);
    assert_eq!(wizard.config.output_path, fixture.cwd.join("picked.svg"));

    press(&mut wizard, KeyCode::Char('y'));
    assert_eq!(wizard.step, Step::Complete);
    let svg = fs::read_to_string(fixture.cwd.join("picked.svg")).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("viewBox=\"0 0 256 256\""));
}

#[test]
fn test_generation_failure_stays_on_confirm() {
    let fixture = Fixture::new();
    fs::write(fixture.cwd.join("blocker"), "not a directory").unwrap();
    let mut wizard = fixture.wizard();

    press(&mut wizard, KeyCode::Enter);
    type_text(&mut wizard, "hello");
    for _ in 0..5 {
        press(&mut wizard, KeyCode::Enter);
    }
    type_text(&mut wizard, "blocker/qr");
    press(&mut wizard, KeyCode::Enter);
    press(&mut wizard, KeyCode::Enter);

    assert_eq!(wizard.step, Step::Confirm);
    assert!(wizard.error.is_some());
    assert!(wizard.history().unwrap().list().is_empty());
    assert!(!wizard.should_quit());
}
