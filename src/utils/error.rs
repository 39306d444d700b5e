use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirEditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid key name: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, DirEditError>;
