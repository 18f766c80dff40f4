//! Polling assertions for async tests.

use std::time::Duration;

use tokio::time::{Instant, sleep};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Polls `condition` until it returns `true` or `timeout` expires.
///
/// Returns whether the condition held. The condition is checked once more
/// after the deadline, so a zero timeout still evaluates it.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use ubdb_test_utils::assert_eventually;
///
/// # async fn demo(handle: tokio::task::JoinHandle<()>) {
/// let finished = assert_eventually(Duration::from_secs(5), || handle.is_finished()).await;
/// assert!(finished, "server task should exit after shutdown");
/// # }
/// ```
pub async fn assert_eventually<F>(timeout: Duration, condition: F) -> bool
where
    F: Fn() -> bool,
{
    let deadline = Instant::now() + timeout;

    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        sleep(POLL_INTERVAL).await;
    }

    condition()
}
