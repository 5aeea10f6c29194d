use std::time::Duration;
use tokio::sync::Notify;

/// Shared signal that forces an out-of-schedule check round.
///
/// `set()` stores a wake-up permit; setting it again before the checker has
/// consumed the previous one is a no-op, so any number of manual refreshes
/// between two rounds collapse into a single extra round.
#[derive(Debug, Default)]
pub struct CheckTrigger {
    notify: Notify,
}

impl CheckTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests an immediate check round. Safe to call from any thread.
    pub fn set(&self) {
        self.notify.notify_one();
    }

    /// Waits for up to `timeout` for the trigger to fire, consuming the
    /// pending permit if one exists. Returns true if the wait ended because
    /// of a trigger, false if the timeout elapsed.
    pub async fn wait_timeout(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.notify.notified())
            .await
            .is_ok()
    }
}
