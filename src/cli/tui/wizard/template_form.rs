//! Multi-field forms for structured content types

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use super::state::Outcome;
use super::text_field::TextField;
use crate::templates::{ContentType, EmailData, SmsData, VCardData, WiFiData, WiFiEncryption};

/// Why a form cannot be submitted yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("network name (SSID) is required")]
    MissingSsid,
    #[error("a first or last name is required")]
    MissingName,
    #[error("an email address is required")]
    MissingAddress,
    #[error("a phone number is required")]
    MissingPhone,
}

#[derive(Debug, Clone)]
pub struct WiFiForm {
    pub ssid: TextField,
    pub password: TextField,
    pub encryption_index: usize,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    pub first_name: TextField,
    pub last_name: TextField,
    pub phone: TextField,
    pub email: TextField,
    pub organization: TextField,
    pub title: TextField,
    pub url: TextField,
}

#[derive(Debug, Clone)]
pub struct EmailForm {
    pub address: TextField,
    pub subject: TextField,
    pub body: TextField,
}

#[derive(Debug, Clone)]
pub struct SmsForm {
    pub phone: TextField,
    pub message: TextField,
}

/// Fields of the form for one structured content type
#[derive(Debug, Clone)]
pub enum TemplateForm {
    WiFi(WiFiForm),
    Contact(ContactForm),
    Email(EmailForm),
    Sms(SmsForm),
}

/// How a field is drawn
pub enum FieldView<'a> {
    Text(&'a TextField),
    /// Options with the selected index
    Selector(Vec<&'static str>, usize),
    Toggle(bool),
}

impl TemplateForm {
    /// Empty form for `content_type`, or `None` for free-text types.
    pub fn new(content_type: ContentType) -> Option<Self> {
        let form = match content_type {
            ContentType::WiFi => TemplateForm::WiFi(WiFiForm {
                ssid: TextField::new("MyNetwork", 64),
                password: TextField::new("password123", 128),
                encryption_index: 0,
                hidden: false,
            }),
            ContentType::Contact => TemplateForm::Contact(ContactForm {
                first_name: TextField::new("John", 64),
                last_name: TextField::new("Doe", 64),
                phone: TextField::new("+1234567890", 20),
                email: TextField::new("john@example.com", 128),
                organization: TextField::new("Acme Inc.", 128),
                title: TextField::new("Software Engineer", 128),
                url: TextField::new("https://example.com", 256),
            }),
            ContentType::Email => TemplateForm::Email(EmailForm {
                address: TextField::new("user@example.com", 128),
                subject: TextField::new("Hello!", 256),
                body: TextField::new("I wanted to reach out...", 512),
            }),
            ContentType::Sms => TemplateForm::Sms(SmsForm {
                phone: TextField::new("+1234567890", 20),
                message: TextField::new("Hello!", 256),
            }),
            ContentType::Url | ContentType::Text => return None,
        };
        Some(form)
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            TemplateForm::WiFi(_) => ContentType::WiFi,
            TemplateForm::Contact(_) => ContentType::Contact,
            TemplateForm::Email(_) => ContentType::Email,
            TemplateForm::Sms(_) => ContentType::Sms,
        }
    }

    pub fn field_count(&self) -> usize {
        match self {
            TemplateForm::WiFi(_) => 4,
            TemplateForm::Contact(_) => 7,
            TemplateForm::Email(_) => 3,
            TemplateForm::Sms(_) => 2,
        }
    }

    /// Whether `index` is a selector or toggle rather than a text input
    pub fn is_toggle_field(&self, index: usize) -> bool {
        matches!(self, TemplateForm::WiFi(_)) && (index == 2 || index == 3)
    }

    pub fn field_label(&self, index: usize) -> &'static str {
        const WIFI: [&str; 4] = ["Network Name (SSID):", "Password:", "Encryption:", "Hidden Network:"];
        const CONTACT: [&str; 7] = [
            "First Name:",
            "Last Name:",
            "Phone:",
            "Email:",
            "Organization:",
            "Job Title:",
            "Website:",
        ];
        const EMAIL: [&str; 3] = ["Email Address:", "Subject:", "Body:"];
        const SMS: [&str; 2] = ["Phone Number:", "Message:"];

        let labels: &[&'static str] = match self {
            TemplateForm::WiFi(_) => &WIFI,
            TemplateForm::Contact(_) => &CONTACT,
            TemplateForm::Email(_) => &EMAIL,
            TemplateForm::Sms(_) => &SMS,
        };
        labels.get(index).copied().unwrap_or("")
    }

    pub fn field_view(&self, index: usize) -> Option<FieldView<'_>> {
        let view = match self {
            TemplateForm::WiFi(f) => match index {
                0 => FieldView::Text(&f.ssid),
                1 => FieldView::Text(&f.password),
                2 => FieldView::Selector(
                    WiFiEncryption::ALL.iter().map(|e| e.label()).collect(),
                    f.encryption_index,
                ),
                3 => FieldView::Toggle(f.hidden),
                _ => return None,
            },
            _ => FieldView::Text(self.text_field(index)?),
        };
        Some(view)
    }

    fn text_field(&self, index: usize) -> Option<&TextField> {
        let field = match self {
            TemplateForm::WiFi(f) => match index {
                0 => &f.ssid,
                1 => &f.password,
                _ => return None,
            },
            TemplateForm::Contact(f) => [
                &f.first_name,
                &f.last_name,
                &f.phone,
                &f.email,
                &f.organization,
                &f.title,
                &f.url,
            ]
            .get(index)
            .copied()?,
            TemplateForm::Email(f) => [&f.address, &f.subject, &f.body].get(index).copied()?,
            TemplateForm::Sms(f) => [&f.phone, &f.message].get(index).copied()?,
        };
        Some(field)
    }

    fn text_field_mut(&mut self, index: usize) -> Option<&mut TextField> {
        match self {
            TemplateForm::WiFi(f) => match index {
                0 => Some(&mut f.ssid),
                1 => Some(&mut f.password),
                _ => None,
            },
            TemplateForm::Contact(f) => match index {
                0 => Some(&mut f.first_name),
                1 => Some(&mut f.last_name),
                2 => Some(&mut f.phone),
                3 => Some(&mut f.email),
                4 => Some(&mut f.organization),
                5 => Some(&mut f.title),
                6 => Some(&mut f.url),
                _ => None,
            },
            TemplateForm::Email(f) => match index {
                0 => Some(&mut f.address),
                1 => Some(&mut f.subject),
                2 => Some(&mut f.body),
                _ => None,
            },
            TemplateForm::Sms(f) => match index {
                0 => Some(&mut f.phone),
                1 => Some(&mut f.message),
                _ => None,
            },
        }
    }

    /// Apply `key` to the field at `index`.
    ///
    /// The encryption selector clamps on Left/Right and cycles on Space; the
    /// hidden toggle flips on any of the three.
    pub fn update_field(&mut self, index: usize, key: KeyEvent) {
        if let TemplateForm::WiFi(f) = self {
            match index {
                2 => {
                    let last = WiFiEncryption::ALL.len() - 1;
                    match key.code {
                        KeyCode::Left => f.encryption_index = f.encryption_index.saturating_sub(1),
                        KeyCode::Right => f.encryption_index = (f.encryption_index + 1).min(last),
                        KeyCode::Char(' ') => f.encryption_index = (f.encryption_index + 1) % (last + 1),
                        _ => {}
                    }
                    return;
                }
                3 => {
                    if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                        f.hidden = !f.hidden;
                    }
                    return;
                }
                _ => {}
            }
        }

        if let Some(field) = self.text_field_mut(index) {
            field.handle_key(key);
        }
    }

    pub fn tick_field(&mut self, index: usize) {
        if let Some(field) = self.text_field_mut(index) {
            field.tick();
        }
    }

    /// Validate the form and build the payload string.
    ///
    /// Text values are trimmed, except the WiFi password which is used as
    /// typed.
    pub fn try_encode(&self) -> Result<String, ValidationError> {
        match self {
            TemplateForm::WiFi(f) => {
                let ssid = f.ssid.value().trim();
                if ssid.is_empty() {
                    return Err(ValidationError::MissingSsid);
                }
                let data = WiFiData {
                    ssid: ssid.to_string(),
                    password: f.password.value().to_string(),
                    encryption: WiFiEncryption::ALL[f.encryption_index.min(2)],
                    hidden: f.hidden,
                };
                Ok(data.encode())
            }
            TemplateForm::Contact(f) => {
                let first_name = trimmed(&f.first_name);
                let last_name = trimmed(&f.last_name);
                if first_name.is_empty() && last_name.is_empty() {
                    return Err(ValidationError::MissingName);
                }
                let data = VCardData {
                    first_name,
                    last_name,
                    phone: trimmed(&f.phone),
                    email: trimmed(&f.email),
                    organization: trimmed(&f.organization),
                    title: trimmed(&f.title),
                    url: trimmed(&f.url),
                };
                Ok(data.encode())
            }
            TemplateForm::Email(f) => {
                let address = trimmed(&f.address);
                if address.is_empty() {
                    return Err(ValidationError::MissingAddress);
                }
                let data = EmailData {
                    address,
                    subject: trimmed(&f.subject),
                    body: trimmed(&f.body),
                };
                Ok(data.encode())
            }
            TemplateForm::Sms(f) => {
                let phone = trimmed(&f.phone);
                if phone.is_empty() {
                    return Err(ValidationError::MissingPhone);
                }
                let data = SmsData {
                    phone,
                    message: trimmed(&f.message),
                };
                Ok(data.encode())
            }
        }
    }
}

fn trimmed(field: &TextField) -> String {
    field.value().trim().to_string()
}

/// A template form plus its focus and last validation failure
#[derive(Debug, Clone)]
pub struct TemplateWizard {
    pub form: TemplateForm,
    focus: usize,
    error: Option<ValidationError>,
}

impl TemplateWizard {
    pub fn new(content_type: ContentType) -> Option<Self> {
        TemplateForm::new(content_type).map(|form| Self {
            form,
            focus: 0,
            error: None,
        })
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_first(&mut self) {
        self.focus = 0;
        self.error = None;
    }

    /// Failure from the last submit attempt, cleared by the next key
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome<String> {
        self.error = None;
        let on_toggle = self.form.is_toggle_field(self.focus);

        match key.code {
            KeyCode::Esc => return Outcome::Cancelled,
            KeyCode::Enter => match self.form.try_encode() {
                Ok(payload) => return Outcome::Confirmed(payload),
                Err(e) => {
                    tracing::debug!("Template form rejected: {}", e);
                    self.error = Some(e);
                }
            },
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.saturating_sub(1),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus = self.focus.saturating_sub(1);
            }
            KeyCode::Tab | KeyCode::Down => {
                if self.focus + 1 < self.form.field_count() {
                    self.focus += 1;
                }
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if on_toggle => {
                self.form.update_field(self.focus, key);
            }
            _ if !on_toggle => self.form.update_field(self.focus, key),
            _ => {}
        }
        Outcome::Active
    }

    pub fn tick(&mut self) {
        self.form.tick_field(self.focus);
    }
}
