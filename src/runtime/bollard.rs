// ABOUTME: Bollard-backed implementation of the runtime capability traits.
// ABOUTME: Talks to a local Docker-compatible daemon over its unix socket.

use crate::runtime::traits::{
    AttachError, AttachOps, ContainerError, ContainerOps, ContainerState, ContainerSummary,
    CreateOptions, ImageError, ImageOps, OutputStream,
};
use crate::types::{ContainerId, ImageRef};
use async_trait::async_trait;
use bollard::Docker;
use bollard::container::LogOutput;
use bollard::models::{ContainerCreateBody, HostConfig, PortBinding};
use bollard::query_parameters::{
    AttachContainerOptions, CreateContainerOptions, CreateImageOptions, InspectContainerOptions,
    RemoveContainerOptions, StartContainerOptions, WaitContainerOptions,
};
use bytes::{BufMut, Bytes, BytesMut};
use futures::StreamExt;
use std::collections::HashMap;

/// Default daemon socket for a local development host.
pub const DEFAULT_SOCKET: &str = "/var/run/docker.sock";

/// Failure to reach the daemon socket.
#[derive(Debug, thiserror::Error)]
#[error("failed to connect to runtime socket: {0}")]
pub struct ConnectError(String);

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_create_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::ImageNotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ContainerError::AlreadyExists(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_attach_error(e: bollard::errors::Error) -> AttachError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => AttachError::NotFound(message.clone()),
        _ => AttachError::Runtime(e.to_string()),
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Runtime client backed by bollard.
pub struct BollardRuntime {
    client: Docker,
}

impl BollardRuntime {
    pub fn new(client: Docker) -> Self {
        Self { client }
    }

    /// Connect to the daemon at the given unix socket path.
    pub fn connect(socket_path: &str) -> Result<Self, ConnectError> {
        let client = Docker::connect_with_unix(socket_path, 120, bollard::API_DEFAULT_VERSION)
            .map_err(|e| ConnectError(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Expose the underlying client for collaborators that share the
    /// daemon connection (the network attachment subsystem).
    pub fn client(&self) -> Docker {
        self.client.clone()
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn inspect_container(&self, name: &str) -> Result<ContainerSummary, ContainerError> {
        let details = self
            .client
            .inspect_container(name, None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        let state = details
            .state
            .as_ref()
            .and_then(|s| s.status)
            .map(|s| match s {
                bollard::models::ContainerStateStatusEnum::CREATED => ContainerState::Created,
                bollard::models::ContainerStateStatusEnum::RUNNING => ContainerState::Running,
                _ => ContainerState::Exited,
            })
            .unwrap_or(ContainerState::Exited);

        Ok(ContainerSummary {
            id: ContainerId::new(details.id.unwrap_or_default()),
            name: details
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
            state,
        })
    }

    async fn remove_container(&self, name: &str, force: bool) -> Result<(), ContainerError> {
        let opts = RemoveContainerOptions {
            force,
            ..Default::default()
        };

        self.client
            .remove_container(name, Some(opts))
            .await
            .map_err(map_container_not_found_error)?;

        Ok(())
    }

    async fn create_container(
        &self,
        options: &CreateOptions,
    ) -> Result<ContainerId, ContainerError> {
        let mut host_config = None;
        if !options.port_bindings.is_empty() {
            let mut bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
            for binding in &options.port_bindings {
                bindings.insert(
                    format!("{}/tcp", binding.container_port),
                    Some(vec![PortBinding {
                        host_ip: None,
                        host_port: Some(binding.host_port.to_string()),
                    }]),
                );
            }
            host_config = Some(HostConfig {
                port_bindings: Some(bindings),
                ..Default::default()
            });
        }

        let body = ContainerCreateBody {
            image: Some(options.image.to_string()),
            hostname: Some(options.hostname.clone()),
            attach_stdout: Some(options.attach_stdout),
            attach_stderr: Some(options.attach_stderr),
            env: if options.env.is_empty() {
                None
            } else {
                Some(options.env.clone())
            },
            exposed_ports: if options.exposed_ports.is_empty() {
                None
            } else {
                Some(options.exposed_ports.clone())
            },
            host_config,
            ..Default::default()
        };

        let opts = CreateContainerOptions {
            name: Some(options.name.clone()),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), body)
            .await
            .map_err(map_container_create_error)?;

        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .start_container(id.as_str(), None::<StartContainerOptions>)
            .await
            .map_err(map_container_not_found_error)
    }

    async fn wait_container(&self, id: &ContainerId) -> Result<i64, ContainerError> {
        let mut stream = self
            .client
            .wait_container(id.as_str(), None::<WaitContainerOptions>);

        match stream.next().await {
            Some(Ok(response)) => Ok(response.status_code),
            // bollard reports a non-zero exit status as an error variant
            // carrying the code; that is still a successful wait.
            Some(Err(bollard::errors::Error::DockerContainerWaitError { code, .. })) => Ok(code),
            Some(Err(e)) => Err(map_container_not_found_error(e)),
            None => Err(ContainerError::Runtime(
                "wait stream ended without a status".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ImageOps for BollardRuntime {
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, ImageError> {
        match self.client.inspect_image(&reference.to_string()).await {
            Ok(_) => Ok(true),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(ImageError::Runtime(format!(
                "failed to inspect {}: {}",
                reference, e
            ))),
        }
    }

    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError> {
        let opts = CreateImageOptions {
            from_image: Some(reference.to_string()),
            ..Default::default()
        };

        // Pull returns a stream of progress updates. There is no progress
        // UI; consume and discard them.
        let mut stream = self.client.create_image(Some(opts), None, None);
        while let Some(result) = stream.next().await {
            result.map_err(|e| ImageError::PullFailed(format!("{}: {}", reference, e)))?;
        }

        Ok(())
    }
}

#[async_trait]
impl AttachOps for BollardRuntime {
    async fn attach_output(&self, id: &ContainerId) -> Result<OutputStream, AttachError> {
        let opts = AttachContainerOptions {
            stream: true,
            stdout: true,
            stderr: true,
            ..Default::default()
        };

        let results = self
            .client
            .attach_container(id.as_str(), Some(opts))
            .await
            .map_err(map_attach_error)?;

        // bollard already parses the daemon's stream-multiplexing frames;
        // restore the 8-byte header so consumers see wire-format chunks.
        let stream = results.output.map(|item| {
            item.map(frame)
                .map_err(|e| AttachError::Stream(e.to_string()))
        });

        Ok(Box::pin(stream))
    }
}

fn frame(output: LogOutput) -> Bytes {
    let (stream_type, message) = match output {
        LogOutput::StdIn { message } => (0u8, message),
        LogOutput::StdOut { message } | LogOutput::Console { message } => (1u8, message),
        LogOutput::StdErr { message } => (2u8, message),
    };

    let mut buf = BytesMut::with_capacity(8 + message.len());
    buf.put_u8(stream_type);
    buf.put_bytes(0, 3);
    buf.put_u32(message.len() as u32);
    buf.put(message);
    buf.freeze()
}
