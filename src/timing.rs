use std::time::Duration;

/// Yield control for at least `duration` so the host UI's own reactive
/// updates can complete after an interaction. Never fails.
pub async fn suspend_for(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Suspension lengths between host interactions.
///
/// These are tunable constants, not semantic content: each one stands in
/// for "the host has visibly finished reacting to the previous action".
/// An embedding that can observe the host directly may shorten them, as
/// long as the strict action ordering is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    /// Between per-character input signals while typing.
    pub typing: Duration,
    /// After an ordinary interaction (click, focus, tab switch).
    pub action: Duration,
    /// After a commit key-event, while the host renders the next slot.
    pub commit: Duration,
    /// After opening a popover or advancing a step slot.
    pub popover: Duration,
    /// After confirming a panel or submitting a field.
    pub long: Duration,
    /// Between presence probes while waiting for an element.
    pub poll_interval: Duration,
    /// Bound on any single wait for an element to appear.
    pub presence_timeout: Duration,
}

impl Delays {
    /// Defaults tuned against the real host UI.
    pub const fn standard() -> Self {
        Self {
            typing: Duration::from_millis(20),
            action: Duration::from_millis(300),
            commit: Duration::from_millis(500),
            popover: Duration::from_millis(800),
            long: Duration::from_millis(1000),
            poll_interval: Duration::from_millis(100),
            presence_timeout: Duration::from_secs(5),
        }
    }

    /// Near-zero delays for scripted backends.
    ///
    /// The poll interval stays non-zero so waits still make progress
    /// against a paused test clock.
    pub const fn none() -> Self {
        Self {
            typing: Duration::ZERO,
            action: Duration::ZERO,
            commit: Duration::ZERO,
            popover: Duration::ZERO,
            long: Duration::ZERO,
            poll_interval: Duration::from_millis(1),
            presence_timeout: Duration::from_millis(100),
        }
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self::standard()
    }
}
