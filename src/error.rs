// ABOUTME: Application-wide error types for the localdev binary.
// ABOUTME: Uses thiserror for ergonomic error handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid image reference: {0}")]
    InvalidImage(#[from] crate::types::ParseImageRefError),

    #[error(transparent)]
    InvalidEnvVar(#[from] crate::config::EnvVarError),

    #[error(transparent)]
    Connect(#[from] crate::runtime::ConnectError),

    #[error("network setup failed: {0}")]
    Network(#[from] crate::network::NetworkError),

    #[error(transparent)]
    Lifecycle(#[from] crate::lifecycle::LifecycleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
