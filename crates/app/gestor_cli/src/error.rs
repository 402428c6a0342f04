use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("No hay sesión activa. Usa `gestor login` primero.")]
    NotSignedIn,

    /// One or more form fields were rejected before sending anything.
    #[error("{}", .0.join("\n"))]
    InvalidInput(Vec<String>),

    #[error("{}", .0)]
    Client(#[from] gestor_client::ClientError),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),
}
