//! Errors surfaced by the headless harness.

use std::path::PathBuf;

use thiserror::Error;

use standoff_core::error::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Ron { path: PathBuf, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn the game loop thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("game loop is not running")]
    LoopStopped,

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
