// ABOUTME: Test support utilities.
// ABOUTME: Provides fake runtime collaborators and async test helpers.

use std::time::Duration;

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fake;

/// Poll `cond` until it holds, panicking after a couple of seconds.
/// Background work in these tests runs on spawned tasks, so outcomes
/// appear shortly after the triggering call rather than synchronously.
#[allow(dead_code)]
pub async fn wait_until<F>(what: &str, cond: F)
where
    F: Fn() -> bool,
{
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("timed out waiting for: {what}");
}
