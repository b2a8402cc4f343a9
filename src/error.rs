use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 空選取時顯示的訊息
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select an image.";

pub type Result<T> = std::result::Result<T, ConvertError>;

/// 轉換流程中所有可回報給使用者的錯誤
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Validation(String),

    #[error("Compression failed: {0}")]
    Compression(String),

    #[error("Failed to read '{}': {}", .0.display(), .1)]
    Read(PathBuf, #[source] io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Failed to build archive: {0}")]
    Archive(String),

    #[error("Failed to write '{}': {}", .0.display(), .1)]
    Output(PathBuf, #[source] io::Error),

    #[error("{0}")]
    Config(String),
}

impl ConvertError {
    pub fn empty_selection() -> Self {
        ConvertError::Validation(EMPTY_SELECTION_MESSAGE.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConvertError::Validation(_))
    }

    /// 顯示給使用者的通知文字
    pub fn notification(&self) -> String {
        match self {
            ConvertError::Validation(msg) if msg == EMPTY_SELECTION_MESSAGE => msg.clone(),
            other => format!("Error: {}", other),
        }
    }
}
