// ABOUTME: Error type for container lifecycle operations.
// ABOUTME: Distinguishes image pull failures from other runtime failures.

use crate::graph::GraphError;
use crate::network::NetworkError;
use crate::runtime::{AttachError, ContainerError, ImageError};

/// Errors surfaced by start, stop, and the tasks they run.
///
/// The first failing task's error propagates verbatim out of the start
/// cycle; `ImagePull` is a distinguished kind so callers can tell "image
/// unavailable" apart from other runtime failures.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// A container operation against the runtime failed.
    #[error("container operation failed: {0}")]
    Container(#[from] ContainerError),

    /// The image could not be pulled from its registry.
    #[error("image pull failed: {0}")]
    ImagePull(#[source] ImageError),

    /// Image inspection failed for a reason other than absence.
    #[error("image inspection failed: {0}")]
    Image(ImageError),

    /// Attaching to the container's output failed.
    #[error("output attachment failed: {0}")]
    Attach(#[from] AttachError),

    /// Attaching the container to the network failed.
    #[error("network attachment failed: {0}")]
    Network(#[from] NetworkError),

    /// The start graph itself was malformed.
    #[error("task graph error: {0}")]
    Graph(#[from] GraphError),
}

impl LifecycleError {
    /// True when the failure was an image pull, as opposed to any other
    /// runtime problem.
    pub fn is_image_pull(&self) -> bool {
        matches!(self, LifecycleError::ImagePull(_))
    }
}
