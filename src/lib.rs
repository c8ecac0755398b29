//! UI automation for a guided-cooking recipe editor
//!
//! This crate translates a structured recipe document into a sequence of
//! simulated operator interactions against a third-party recipe editor's
//! web UI, which exposes no programmatic write API. The model is inspired
//! by Playwright: an abstract surface engine locates elements by
//! role/attribute selectors, and phase executors drive ordered, best-effort
//! interactions interleaved with explicit suspensions so the host UI's own
//! reactive updates can settle.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub mod element;
pub mod errors;
pub mod fill;
pub mod locator;
pub mod parsers;
pub mod phase;
pub mod recipe;
pub mod selector;
pub mod surface;
#[cfg(test)]
mod tests;
pub mod timing;

pub use element::{SurfaceElement, SurfaceElementImpl};
pub use errors::AutomationError;
pub use fill::{NullPanel, OperatorPanel, RecipeFiller, RunOutcome};
pub use locator::Locator;
pub use phase::{detect_phase, EditorPhase, PageContext};
pub use recipe::RecipeDocument;
pub use selector::Selector;
pub use surface::SurfaceEngine;
pub use timing::{suspend_for, Delays};

/// The engine-facing handle to the host UI.
///
/// Wraps a [`SurfaceEngine`] implementation and hands out [`Locator`]s and
/// ephemeral [`SurfaceElement`]s. The engine never caches element handles
/// across suspension points; the host may re-render at any time, so every
/// interaction re-queries through this handle.
pub struct Surface {
    engine: Arc<dyn SurfaceEngine>,
}

impl Surface {
    pub fn new(engine: Arc<dyn SurfaceEngine>) -> Self {
        Self { engine }
    }

    /// The URL of the page the host UI is currently showing.
    pub fn current_url(&self) -> Result<String, AutomationError> {
        self.engine.current_url()
    }

    #[instrument(skip(self, selector))]
    pub fn locator(&self, selector: impl Into<Selector>) -> Locator {
        Locator::new(self.engine.clone(), selector.into())
    }

    /// Find a single element, treating absence as an error.
    pub async fn find(
        &self,
        selector: impl Into<Selector>,
    ) -> Result<SurfaceElement, AutomationError> {
        self.engine.find_element(&selector.into()).await
    }

    /// Find a single element, treating absence as a normal outcome.
    ///
    /// The host UI's layout varies with its own state, so a missing element
    /// is expected; callers skip the enclosing sub-step rather than fail.
    pub async fn try_find(&self, selector: impl Into<Selector>) -> Option<SurfaceElement> {
        let selector = selector.into();
        match self.engine.find_element(&selector).await {
            Ok(element) => Some(element),
            Err(AutomationError::ElementNotFound(_)) => None,
            Err(e) => {
                debug!(%selector, error = %e, "lookup failed, treating as absent");
                None
            }
        }
    }

    /// Find all matching elements, in host order. An unknown selector
    /// yields an empty sequence, not an error.
    pub async fn find_all(
        &self,
        selector: impl Into<Selector>,
    ) -> Result<Vec<SurfaceElement>, AutomationError> {
        self.engine.find_elements(&selector.into()).await
    }

    /// Type `text` into `target` one character at a time, emitting one
    /// input signal per character with a suspension in between. Some host
    /// fields only react to incremental input, so a bulk `set_text` is not
    /// always an option.
    pub async fn type_characters(
        &self,
        target: &SurfaceElement,
        text: &str,
        per_char_delay: Duration,
    ) -> Result<(), AutomationError> {
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            target.insert_text(ch.encode_utf8(&mut buf)).await?;
            suspend_for(per_char_delay).await;
        }
        Ok(())
    }
}

impl Clone for Surface {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}
