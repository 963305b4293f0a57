// ABOUTME: Runtime boundary: capability traits plus the bollard adapter.
// ABOUTME: The controller only ever sees the traits.

mod bollard;
pub mod traits;

pub use bollard::{BollardRuntime, ConnectError, DEFAULT_SOCKET};
pub use traits::{
    AttachError, AttachOps, ContainerError, ContainerOps, ContainerState, ContainerSummary,
    CreateOptions, ImageError, ImageOps, OutputStream, PortBinding, Runtime,
};
