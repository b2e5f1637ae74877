use thiserror::Error;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid module id: {0:?}")]
    InvalidModuleId(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
