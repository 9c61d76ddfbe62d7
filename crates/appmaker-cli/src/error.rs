//! Error types for the CLI

use std::path::PathBuf;

use appmaker_common::telemetry::TelemetryError;
use appmaker_workload::CompilationError;

/// CLI Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),

    #[error(transparent)]
    Common(#[from] appmaker_common::Error),

    #[error("logging setup failed: {0}")]
    Telemetry(#[from] TelemetryError),
}

impl Error {
    pub fn read_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ReadInput {
            path: path.into(),
            source,
        }
    }
}
