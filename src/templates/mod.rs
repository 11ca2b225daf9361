//! Structured content payloads
//!
//! Each data type renders to the string a phone's camera app expects when it
//! scans the code: WiFi join strings, vCard 3.0 contacts, `mailto:` links and
//! `smsto:` links.

use std::fmt;

/// What the user wants to encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Url,
    WiFi,
    Contact,
    Email,
    Sms,
    Text,
}

impl ContentType {
    /// All content types in menu order
    pub const ALL: [ContentType; 6] = [
        ContentType::Url,
        ContentType::WiFi,
        ContentType::Contact,
        ContentType::Email,
        ContentType::Sms,
        ContentType::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContentType::Url => "URL",
            ContentType::WiFi => "WiFi",
            ContentType::Contact => "Contact",
            ContentType::Email => "Email",
            ContentType::Sms => "SMS",
            ContentType::Text => "Text",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ContentType::Url => "🔗",
            ContentType::WiFi => "📶",
            ContentType::Contact => "👤",
            ContentType::Email => "✉️ ",
            ContentType::Sms => "💬",
            ContentType::Text => "📝",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContentType::Url => "Website link",
            ContentType::WiFi => "WiFi network credentials",
            ContentType::Contact => "Contact card (vCard)",
            ContentType::Email => "Email with subject & body",
            ContentType::Sms => "Text message",
            ContentType::Text => "Plain text",
        }
    }

    /// Whether the content is typed directly instead of through a form
    pub fn is_free_text(&self) -> bool {
        matches!(self, ContentType::Url | ContentType::Text)
    }
}

/// WiFi security type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WiFiEncryption {
    #[default]
    Wpa,
    Wep,
    None,
}

impl WiFiEncryption {
    /// Selector options in display order
    pub const ALL: [WiFiEncryption; 3] = [WiFiEncryption::Wpa, WiFiEncryption::Wep, WiFiEncryption::None];

    /// Token used in the `T:` field
    pub fn code(&self) -> &'static str {
        match self {
            WiFiEncryption::Wpa => "WPA",
            WiFiEncryption::Wep => "WEP",
            WiFiEncryption::None => "nopass",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WiFiEncryption::Wpa => "WPA/WPA2/WPA3",
            WiFiEncryption::Wep => "WEP",
            WiFiEncryption::None => "None (Open)",
        }
    }
}

impl fmt::Display for WiFiEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// WiFi network credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiFiData {
    pub ssid: String,
    pub password: String,
    pub encryption: WiFiEncryption,
    pub hidden: bool,
}

impl WiFiData {
    /// `WIFI:T:<enc>;S:<ssid>;P:<password>;H:true;;`
    pub fn encode(&self) -> String {
        let password = match self.encryption {
            WiFiEncryption::None => String::new(),
            _ => format!("P:{};", escape_wifi_field(&self.password)),
        };
        let hidden = if self.hidden { "H:true;" } else { "" };

        format!(
            "WIFI:T:{};S:{};{}{};",
            self.encryption.code(),
            escape_wifi_field(&self.ssid),
            password,
            hidden
        )
    }
}

/// Contact card fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardData {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub organization: String,
    pub title: String,
    pub url: String,
}

impl VCardData {
    /// vCard 3.0 with CRLF line endings
    pub fn encode(&self) -> String {
        let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];

        let full_name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
        if !full_name.is_empty() {
            lines.push(format!("FN:{}", full_name));
            lines.push(format!("N:{};{};;;", self.last_name, self.first_name));
        }

        let optional = [
            ("ORG", &self.organization),
            ("TITLE", &self.title),
            ("TEL;TYPE=CELL", &self.phone),
            ("EMAIL", &self.email),
            ("URL", &self.url),
        ];
        for (key, value) in optional {
            if !value.is_empty() {
                lines.push(format!("{}:{}", key, value));
            }
        }

        lines.push("END:VCARD".to_string());

        let mut out = lines.join("\r\n");
        out.push_str("\r\n");
        out
    }
}

/// Pre-filled email
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailData {
    pub address: String,
    pub subject: String,
    pub body: String,
}

impl EmailData {
    /// `mailto:<address>?subject=..&body=..`
    pub fn encode(&self) -> String {
        let mut params = Vec::new();
        if !self.subject.is_empty() {
            params.push(format!("subject={}", mailto_escape(&self.subject)));
        }
        if !self.body.is_empty() {
            params.push(format!("body={}", mailto_escape(&self.body)));
        }

        let mut out = format!("mailto:{}", self.address);
        if !params.is_empty() {
            out.push('?');
            out.push_str(&params.join("&"));
        }
        out
    }
}

/// Pre-filled text message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsData {
    pub phone: String,
    pub message: String,
}

impl SmsData {
    pub fn encode(&self) -> String {
        if self.message.is_empty() {
            format!("smsto:{}", self.phone)
        } else {
            format!("smsto:{}:{}", self.phone, self.message)
        }
    }
}

/// Backslash-escape the characters that delimit WiFi fields.
pub fn escape_wifi_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ':' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a mailto parameter.
///
/// Only `%`, space, `&`, `=`, `#` and newline are substituted. Other reserved
/// characters such as `+` and `?` pass through unchanged; most mail clients
/// tolerate that, but it is not RFC 6068 percent-encoding.
pub fn mailto_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '#' => out.push_str("%23"),
            '\n' => out.push_str("%0A"),
            other => out.push(other),
        }
    }
    out
}
