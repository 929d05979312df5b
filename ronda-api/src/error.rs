use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{message} (HTTP {status})")]
    Status { status: StatusCode, message: String },
    #[error("{message}")]
    Backend { message: String },
    #[error("RequestError: {0}")]
    Request(#[from] reqwest::Error),
    #[error("ParsingError: {0}")]
    Parse(String),
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Message suitable for the status bar. Backend messages are passed through untouched.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Sessão expirada. Faça login novamente.".to_string(),
            ApiError::Backend { message } => message.clone(),
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
