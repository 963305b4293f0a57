// ABOUTME: Validated domain types for container identity and images.
// ABOUTME: Exposes ContainerKind, ContainerIdentity, ContainerId, ImageRef.

mod id;
mod identity;
mod image_ref;
mod kind;

pub use id::ContainerId;
pub use identity::{ContainerIdentity, ROUTER_CONTAINER_NAME};
pub use image_ref::{ImageRef, ParseImageRefError};
pub use kind::ContainerKind;
