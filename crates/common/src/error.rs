use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkshieldError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("image decode error: {0}")]
    Decode(String),

    #[error("no QR code found in image")]
    NoQrPayload,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type LinkshieldResult<T> = Result<T, LinkshieldError>;
