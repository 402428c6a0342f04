//! Client error types.

use thiserror::Error;

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, undecodable body.
    #[error("Error de red: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("URL inválida: {0}")]
    Url(#[from] url::ParseError),

    #[error("Error de almacenamiento: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Datos inválidos: {0}")]
    Serde(#[from] serde_json::Error),
}
