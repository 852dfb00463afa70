use crate::core::models::trajectory::TrajectoryError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Trajectory unavailable: {source}")]
    Trajectory {
        #[from]
        source: TrajectoryError,
    },

    #[error("Compute needs at least one frame")]
    NoFrames,

    #[error("Compute needs time data, but frame {frame} carries none")]
    MissingTime { frame: usize },

    #[error("Time-origin spacing must be at least 1")]
    InvalidOriginSpacing,

    #[error("Type '{name}' is not in the current selection")]
    UnknownType { name: String },

    #[error("Type '{name}' does not occur in the trajectory")]
    TypeNotInTrajectory { name: String },

    #[error("A compute named '{name}' is already registered")]
    DuplicateCompute { name: String },

    #[error("No compute named '{name}' is registered")]
    UnknownCompute { name: String },

    #[error("Failed to write result file '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
