// ABOUTME: Network attachment boundary for the development environment.
// ABOUTME: NetworkAttach trait plus the Docker bridge-network implementation.

use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{NetworkConnectRequest, NetworkCreateRequest};
use bollard::query_parameters::InspectNetworkOptions;

/// Attachment of containers to the environment's shared network.
#[async_trait]
pub trait NetworkAttach: Send + Sync {
    /// Attach the named container to the network.
    async fn attach_container(&self, runtime_name: &str) -> Result<(), NetworkError>;
}

/// Errors from network attachment.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("network not found: {0}")]
    NotFound(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

/// A named Docker bridge network shared by every container in one
/// development environment.
pub struct DockerNetwork {
    client: Docker,
    name: String,
}

impl DockerNetwork {
    pub fn new(client: Docker, name: &str) -> Self {
        Self {
            client,
            name: name.to_string(),
        }
    }

    /// Connect to the named network, creating it as a bridge network if
    /// it does not exist yet.
    pub async fn ensure(client: Docker, name: &str) -> Result<Self, NetworkError> {
        let exists = match client
            .inspect_network(name, None::<InspectNetworkOptions>)
            .await
        {
            Ok(_) => true,
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => false,
            Err(e) => return Err(NetworkError::Runtime(e.to_string())),
        };

        if !exists {
            let request = NetworkCreateRequest {
                name: name.to_string(),
                driver: Some("bridge".to_string()),
                ..Default::default()
            };

            match client.create_network(request).await {
                Ok(_) => {}
                // Lost the create race to another controller; the network
                // exists now, which is all that matters.
                Err(bollard::errors::Error::DockerResponseServerError {
                    status_code: 409, ..
                }) => {}
                Err(e) => return Err(NetworkError::Runtime(e.to_string())),
            }
        }

        Ok(Self::new(client, name))
    }
}

#[async_trait]
impl NetworkAttach for DockerNetwork {
    async fn attach_container(&self, runtime_name: &str) -> Result<(), NetworkError> {
        let request = NetworkConnectRequest {
            container: runtime_name.to_string(),
            endpoint_config: None,
        };

        self.client
            .connect_network(&self.name, request)
            .await
            .map_err(|e| match &e {
                bollard::errors::Error::DockerResponseServerError {
                    status_code: 404,
                    message,
                } => NetworkError::NotFound(message.clone()),
                _ => NetworkError::Runtime(e.to_string()),
            })
    }
}
