use mdpost::core::models::trajectory::TrajectoryError;
use mdpost::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{}': {source}", path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
