use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrowserError>;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("chromium error: {0}")]
    ChromiumError(String),

    #[error("navigation failed: {0}")]
    NavigationError(String),

    #[error("selector not found: {0}")]
    SelectorNotFound(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("pointer dispatch failed: {0}")]
    PointerError(String),

    #[error("pointer is already {0}")]
    PointerState(&'static str),
}

impl From<BrowserError> for slidepass_core::SlidepassError {
    fn from(err: BrowserError) -> Self {
        Self::Browser(err.to_string())
    }
}
