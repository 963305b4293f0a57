// ABOUTME: Output attachment trait for the runtime boundary.
// ABOUTME: Yields the raw multiplexed byte stream of a container's output.

use crate::types::ContainerId;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Raw chunks as read from the attach socket. Each chunk carries the
/// daemon's 8-byte stream-multiplexing header.
pub type OutputStream = Pin<Box<dyn Stream<Item = Result<Bytes, AttachError>> + Send>>;

/// Attachment to a container's combined stdout/stderr stream.
#[async_trait]
pub trait AttachOps {
    /// Attach to the container's output. The returned stream yields
    /// chunks for as long as the container produces output; the attach
    /// call itself completes as soon as the stream is established.
    async fn attach_output(&self, id: &ContainerId) -> Result<OutputStream, AttachError>;
}

/// Errors from output attachment.
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
