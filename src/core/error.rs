use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchitectError {
    #[error("Precondition not met: {0}")]
    Precondition(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Response parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ArchitectError>;
