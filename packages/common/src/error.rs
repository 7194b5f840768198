use thiserror::Error;

/// Error raised while loading colors or design tokens
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Invalid token at '{path}': {message}")]
    InvalidToken { path: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommonError {
    pub fn invalid_color(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_token(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidToken {
            path: path.into(),
            message: message.into(),
        }
    }
}
