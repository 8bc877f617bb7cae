use thiserror::Error;

#[derive(Error, Debug)]
pub enum FloraScanError {
    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Common(#[from] florascan_common::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl FloraScanError {
    /// ユーザー向けの入力エラーか（ログではなく通知として出す）
    pub fn is_user_facing(&self) -> bool {
        match self {
            FloraScanError::Common(e) => e.is_user_facing(),
            FloraScanError::FileNotFound(_) | FloraScanError::UnsupportedImage(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, FloraScanError>;
