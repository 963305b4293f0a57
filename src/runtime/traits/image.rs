// ABOUTME: Image operations trait for the runtime boundary.
// ABOUTME: Existence checks and registry pulls with discarded progress.

use crate::types::ImageRef;
use async_trait::async_trait;

/// Image operations: existence check and pull.
#[async_trait]
pub trait ImageOps {
    /// Check whether an image is present locally.
    ///
    /// A not-found response from the daemon maps to `Ok(false)`; only
    /// other failures surface as errors.
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, ImageError>;

    /// Pull an image from its registry, consuming progress events
    /// internally. Completes when the pull has finished.
    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
