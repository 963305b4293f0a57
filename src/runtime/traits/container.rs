// ABOUTME: Container operations trait for the runtime boundary.
// ABOUTME: Inspect, remove, create, start, and wait on containers.

use super::shared_types::{ContainerSummary, CreateOptions};
use crate::types::ContainerId;
use async_trait::async_trait;

/// Container lifecycle operations against the runtime daemon.
///
/// Inspection and removal address containers by runtime name, because
/// the controller must reconcile leftovers from a previous run that it
/// holds no id for. Start and wait address the instance created this
/// cycle by id.
#[async_trait]
pub trait ContainerOps {
    /// Inspect a container by its runtime name.
    ///
    /// Returns `ContainerError::NotFound` when no such container exists;
    /// callers treat that as a signal, not a failure.
    async fn inspect_container(&self, name: &str) -> Result<ContainerSummary, ContainerError>;

    /// Remove a container by runtime name.
    async fn remove_container(&self, name: &str, force: bool) -> Result<(), ContainerError>;

    /// Create a container, returning the id assigned by the runtime.
    async fn create_container(&self, options: &CreateOptions) -> Result<ContainerId, ContainerError>;

    /// Start a created container.
    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError>;

    /// Wait until the container stops and return its exit status code.
    async fn wait_container(&self, id: &ContainerId) -> Result<i64, ContainerError>;
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("container already exists: {0}")]
    AlreadyExists(String),

    #[error("image not found: {0}")]
    ImageNotFound(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl ContainerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContainerError::NotFound(_))
    }
}
