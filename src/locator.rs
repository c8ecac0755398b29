use tracing::{debug, instrument};

use crate::element::SurfaceElement;
use crate::errors::AutomationError;
use crate::selector::Selector;
use crate::surface::SurfaceEngine;
use crate::timing::suspend_for;
use std::sync::Arc;
use std::time::Duration;

// Defaults if none are specified on the locator itself
const DEFAULT_LOCATOR_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A high-level API for finding and waiting on host UI elements.
///
/// `wait` is the only operation in the engine with a bounded-retry failure
/// mode: it repeatedly probes the surface until a match appears or the
/// timeout elapses.
#[derive(Clone)]
pub struct Locator {
    engine: Arc<dyn SurfaceEngine>,
    selector: Selector,
    timeout: Duration,
    poll_interval: Duration,
}

impl Locator {
    /// Create a new locator with the given selector
    pub(crate) fn new(engine: Arc<dyn SurfaceEngine>, selector: Selector) -> Self {
        Self {
            engine,
            selector,
            timeout: DEFAULT_LOCATOR_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set a default timeout for waiting operations on this locator instance.
    /// This timeout is used if no specific timeout is passed to `wait`.
    pub fn set_default_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the interval between presence probes.
    pub fn set_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Probe the surface once for the first match.
    pub async fn first(&self) -> Result<SurfaceElement, AutomationError> {
        self.engine.find_element(&self.selector).await
    }

    /// Get all elements matching this locator right now, in host order.
    pub async fn all(&self) -> Result<Vec<SurfaceElement>, AutomationError> {
        self.engine.find_elements(&self.selector).await
    }

    /// Wait for an element matching the locator to appear, up to the
    /// specified timeout. If no timeout is provided, uses the locator's
    /// default timeout.
    #[instrument(level = "debug", skip(self, timeout))]
    pub async fn wait(&self, timeout: Option<Duration>) -> Result<SurfaceElement, AutomationError> {
        debug!("Waiting for element matching selector: {:?}", self.selector);
        let effective_timeout = timeout.unwrap_or(self.timeout);
        let deadline = tokio::time::Instant::now() + effective_timeout;

        loop {
            match self.engine.find_element(&self.selector).await {
                Ok(element) => return Ok(element),
                Err(AutomationError::ElementNotFound(_)) => {}
                Err(e) => return Err(e),
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(AutomationError::Timeout(format!(
                    "Timed out after {effective_timeout:?} waiting for element {:?}",
                    self.selector
                )));
            }
            suspend_for(self.poll_interval).await;
        }
    }

    pub fn selector_string(&self) -> String {
        format!("{:?}", self.selector)
    }
}
