// ABOUTME: Shared data types crossing the runtime boundary.
// ABOUTME: Creation options, port bindings, and container summaries.

use crate::types::{ContainerId, ImageRef};

/// Options for creating a container, mirroring the daemon's creation
/// surface that this system actually uses.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Runtime name the container is created under.
    pub name: String,
    /// Hostname inside the container; always equal to `name` here.
    pub hostname: String,
    /// Image to create from.
    pub image: ImageRef,
    /// `KEY=VALUE` pairs. Omitted from the request when empty.
    pub env: Vec<String>,
    pub attach_stdout: bool,
    pub attach_stderr: bool,
    /// Host-to-container TCP port bindings. Router only.
    pub port_bindings: Vec<PortBinding>,
    /// Exposed container ports, `"443/tcp"` form. Router only.
    pub exposed_ports: Vec<String>,
}

/// One published TCP port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortBinding {
    pub host_port: u16,
    pub container_port: u16,
}

/// Minimal inspection result: enough to know the container exists and
/// what state it is in.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    pub id: ContainerId,
    pub name: String,
    pub state: ContainerState,
}

/// Runtime-reported container state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Exited,
}
