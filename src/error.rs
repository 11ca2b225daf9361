use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrgenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("QR encoding error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Update error: {0}")]
    Update(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, QrgenError>;
