// ABOUTME: Bounded-attempt restart policy for unexpected container exits.
// ABOUTME: Pure decision logic, kept separate from the controller for testing.

/// Restart attempts allowed over a controller's lifetime.
pub const MAX_RESTART_ATTEMPTS: u32 = 10;

/// Outcome of evaluating the restart policy for one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartDecision {
    /// Attempt another start cycle.
    Restart,
    /// Stay down: either the stop was intentional or the attempt
    /// ceiling is exhausted.
    GiveUp,
}

/// Bounded-attempt restart policy.
///
/// The attempt counter it judges never resets for the lifetime of the
/// controller, so a container that keeps crashing eventually exhausts
/// its attempts for good.
#[derive(Debug, Clone, Copy)]
pub struct RestartPolicy {
    max_attempts: u32,
}

impl RestartPolicy {
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Decide whether restart trigger number `attempt` (1-based) should
    /// produce another start cycle.
    pub fn decide(&self, desired_running: bool, attempt: u32) -> RestartDecision {
        if desired_running && attempt <= self.max_attempts {
            RestartDecision::Restart
        } else {
            RestartDecision::GiveUp
        }
    }
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self::new(MAX_RESTART_ATTEMPTS)
    }
}
