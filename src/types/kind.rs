// ABOUTME: Enumerated container roles within a development environment.
// ABOUTME: The kind drives naming, creation options, and output handling.

use std::fmt;

/// Role of a container within the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// The environment's single ingress proxy. One per namespace, with a
    /// reserved runtime name and published ports.
    Router,
    /// An application service with attributable output.
    Service,
    /// A backing resource (database, queue). Produces no interactive
    /// output worth attributing, so output attachment is skipped.
    Resource,
}

impl ContainerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Router => "router",
            ContainerKind::Service => "service",
            ContainerKind::Resource => "resource",
        }
    }

    /// Capitalized form used in exit warnings ("Router", "Service", ...).
    pub fn capitalized(&self) -> &'static str {
        match self {
            ContainerKind::Router => "Router",
            ContainerKind::Service => "Service",
            ContainerKind::Resource => "Resource",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
