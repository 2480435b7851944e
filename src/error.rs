//! Front-end error types.
//!
//! The simulation itself cannot fail; only terminal I/O, the log file and
//! configuration loading can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;
