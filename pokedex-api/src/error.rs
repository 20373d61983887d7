/// Errors that can occur while talking to PokeAPI or reading its payloads.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
