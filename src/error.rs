//! Error types for bgkflow.

use std::path::PathBuf;
use thiserror::Error;

pub type LbResult<T> = Result<T, LbError>;

#[derive(Debug, Error)]
pub enum LbError {
    #[error("could not open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read param file: {0}")]
    MissingParameter(&'static str),

    #[error("could not parse param file value for {name}: {value:?}")]
    ParseParameter { name: &'static str, value: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("expected 3 values per line in obstacle file (line {line})")]
    ObstacleFormat { line: usize },

    #[error("obstacle {axis}-coord out of range (line {line}: {value})")]
    ObstacleOutOfRange {
        line: usize,
        axis: &'static str,
        value: i64,
    },

    #[error("blocked cell {entry} has {axis}-coord out of range: {value}")]
    BlockedCellOutOfRange {
        entry: usize,
        axis: &'static str,
        value: usize,
    },

    #[error("obstacle blocked value should be 1 (line {line}: {flag})")]
    ObstacleFlag { line: usize, flag: i64 },

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("numerical instability: non-finite average velocity at time step {time_step}")]
    Unstable { time_step: usize },
}

impl LbError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LbError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        LbError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
