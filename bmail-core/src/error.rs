/// Errors raised by transformers and backends
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Email not found: {0}")]
    NotFound(String),

    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, MailError>;
