use thiserror::Error;

#[derive(Error, Debug)]
pub enum DestinasiError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Form has not been initialized")]
    NotInitialized,

    #[error("Form has been unmounted")]
    Unmounted,

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Payload error: {0}")]
    Payload(String),
}

pub type Result<T> = std::result::Result<T, DestinasiError>;
