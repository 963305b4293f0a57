// ABOUTME: Capability traits for the container runtime boundary.
// ABOUTME: Defines ContainerOps, ImageOps, AttachOps and the Runtime umbrella.

mod attach;
mod container;
mod image;
mod shared_types;

pub use attach::{AttachError, AttachOps, OutputStream};
pub use container::{ContainerError, ContainerOps};
pub use image::{ImageError, ImageOps};
pub use shared_types::*;

/// Everything the lifecycle controller needs from a runtime.
///
/// Deliberately open for implementation: tests substitute fakes for the
/// daemon-backed client.
pub trait Runtime: ContainerOps + ImageOps + AttachOps + Send + Sync {}

impl<T: ContainerOps + ImageOps + AttachOps + Send + Sync> Runtime for T {}
