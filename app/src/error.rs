//! FILENAME: app/src/error.rs
// PURPOSE: Error types of the reporting layer.

use persistence::PersistenceError;
use thiserror::Error;

/// Why a backend fetch produced no data.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned status {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Why an export or grid command could not run.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Carries the tooltip text of the disabled action.
    #[error("{0}")]
    NotReady(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Edit rejected: {0}")]
    Edit(#[from] report_engine::EditError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("No project selected")]
    NoProjectSelected,

    #[error("No estimation selected")]
    NoEstimationSelected,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
