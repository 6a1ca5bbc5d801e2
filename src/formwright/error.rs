use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
