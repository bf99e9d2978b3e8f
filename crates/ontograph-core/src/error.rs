use thiserror::Error;

/// Errors shared by all Ontograph crates.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid path: a path needs at least one node")]
    InvalidPath,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
