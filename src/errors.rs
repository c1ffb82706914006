use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid request target: {0:?}")]
    InvalidTarget(String),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode request payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("malformed element id: {0:?}")]
    MalformedElementId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape(message.into())
    }

    /// Status code carried by an `HttpStatus` failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}
