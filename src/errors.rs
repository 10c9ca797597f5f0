use thiserror::Error;

#[derive(Error, Debug)]
pub enum MindMapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown author kind: {0}")]
    UnknownAuthorKind(String),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, MindMapError>;
