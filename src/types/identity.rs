// ABOUTME: Immutable identity of one supervised container.
// ABOUTME: Derives the runtime name from namespace, kind, and friendly name.

use super::kind::ContainerKind;

/// Reserved runtime name for the router. The router is a namespace-wide
/// singleton, so it never carries the derived prefix.
pub const ROUTER_CONTAINER_NAME: &str = "localapp";

/// Prefix for all derived container names, marking them as managed by
/// the development environment.
const NAME_PREFIX: &str = "noop";

/// Immutable identity of a supervised container.
///
/// Created once at controller construction. The runtime name is a pure
/// function of the other fields: the router kind maps to the reserved
/// singleton name, every other kind to
/// `noop-{namespace}-{kind}-{friendly_name}`, which is unique within a
/// namespace for a given (kind, friendly name) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerIdentity {
    namespace: String,
    friendly_name: String,
    kind: ContainerKind,
    runtime_name: String,
}

impl ContainerIdentity {
    pub fn new(namespace: &str, friendly_name: &str, kind: ContainerKind) -> Self {
        let runtime_name = match kind {
            ContainerKind::Router => ROUTER_CONTAINER_NAME.to_string(),
            _ => format!("{NAME_PREFIX}-{namespace}-{kind}-{friendly_name}"),
        };

        Self {
            namespace: namespace.to_string(),
            friendly_name: friendly_name.to_string(),
            kind,
            runtime_name,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Name the container is created under in the runtime. Also used as
    /// its hostname.
    pub fn runtime_name(&self) -> &str {
        &self.runtime_name
    }
}
