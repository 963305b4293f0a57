// ABOUTME: Newtype identifier for runtime container instances.
// ABOUTME: Prevents bare strings from leaking through the runtime boundary.

use std::fmt;

/// Identifier assigned by the container runtime at creation time.
///
/// Replaced on every start cycle; never derived locally.
#[must_use = "container ids reference live runtime resources"]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
