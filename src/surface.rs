use crate::element::SurfaceElement;
use crate::errors::AutomationError;
use crate::selector::Selector;
use async_trait::async_trait;

/// The common trait that all surface backends must implement.
///
/// This is the only seam through which the engine touches the external UI
/// tree. The tree is a single externally-owned resource: the engine never
/// keeps an authoritative cache of its state and re-queries before each
/// interaction.
#[async_trait]
pub trait SurfaceEngine: Send + Sync {
    /// The URL of the page the host is currently showing.
    fn current_url(&self) -> Result<String, AutomationError>;

    /// Find a single element matching the selector.
    ///
    /// Absence is reported as [`AutomationError::ElementNotFound`]; callers
    /// treat it as a normal outcome, never a fatal condition.
    async fn find_element(&self, selector: &Selector) -> Result<SurfaceElement, AutomationError>;

    /// Find all elements matching the selector, in host document order.
    /// No match yields an empty sequence.
    async fn find_elements(
        &self,
        selector: &Selector,
    ) -> Result<Vec<SurfaceElement>, AutomationError>;
}
