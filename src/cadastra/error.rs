use thiserror::Error;

#[derive(Error, Debug)]
pub enum CadastraError {
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Records have not been loaded yet")]
    NotLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CadastraError>;
