use crate::errors::AutomationError;
use async_trait::async_trait;
use std::fmt;

/// Interface for surface backends to implement one live element.
///
/// Implementations back these operations with whatever primitive the target
/// environment provides (synthetic DOM events, a devtools protocol, an
/// accessibility API). All operations are best-effort against an
/// externally-owned UI tree that may re-render at any moment.
#[async_trait]
pub trait SurfaceElementImpl: Send + Sync {
    fn role(&self) -> String;
    fn name(&self) -> Option<String>;
    async fn click(&self) -> Result<(), AutomationError>;
    async fn focus(&self) -> Result<(), AutomationError>;
    /// Remove the element's current content.
    async fn clear(&self) -> Result<(), AutomationError>;
    /// Atomically replace the content and signal the host's change detection.
    async fn set_text(&self, value: &str) -> Result<(), AutomationError>;
    /// Append `chunk` and emit a single incremental input signal.
    async fn insert_text(&self, chunk: &str) -> Result<(), AutomationError>;
    /// Emit a synthetic key event, e.g. "Enter".
    async fn press_key(&self, key: &str) -> Result<(), AutomationError>;
    async fn is_toggled(&self) -> Result<bool, AutomationError>;
    async fn set_caret_to_end(&self) -> Result<(), AutomationError>;
    async fn scroll_into_view(&self) -> Result<(), AutomationError>;
}

/// An ephemeral handle to one interactive element in the host UI.
///
/// Valid only for the duration of one interaction: the host may invalidate
/// it on its next re-render, so handles are never cached across suspension
/// points. Callers re-query through [`crate::Surface`] instead.
pub struct SurfaceElement {
    inner: Box<dyn SurfaceElementImpl>,
}

impl SurfaceElement {
    /// Create a new element from a backend implementation
    pub fn new(impl_: Box<dyn SurfaceElementImpl>) -> Self {
        Self { inner: impl_ }
    }

    /// Get the element's role (e.g., "button", "textbox")
    pub fn role(&self) -> String {
        self.inner.role()
    }

    /// Get the element's accessible name, if any
    pub fn name(&self) -> Option<String> {
        self.inner.name()
    }

    pub async fn click(&self) -> Result<(), AutomationError> {
        self.inner.click().await
    }

    pub async fn focus(&self) -> Result<(), AutomationError> {
        self.inner.focus().await
    }

    pub async fn clear(&self) -> Result<(), AutomationError> {
        self.inner.clear().await
    }

    /// Replace the element's content in one operation and notify the host.
    pub async fn set_text(&self, value: &str) -> Result<(), AutomationError> {
        self.inner.set_text(value).await
    }

    /// Append text with a single incremental input signal. For hosts that
    /// only react to keystroke-like input, prefer
    /// [`crate::Surface::type_characters`].
    pub async fn insert_text(&self, chunk: &str) -> Result<(), AutomationError> {
        self.inner.insert_text(chunk).await
    }

    pub async fn press_key(&self, key: &str) -> Result<(), AutomationError> {
        self.inner.press_key(key).await
    }

    pub async fn is_toggled(&self) -> Result<bool, AutomationError> {
        self.inner.is_toggled().await
    }

    pub async fn set_caret_to_end(&self) -> Result<(), AutomationError> {
        self.inner.set_caret_to_end().await
    }

    pub async fn scroll_into_view(&self) -> Result<(), AutomationError> {
        self.inner.scroll_into_view().await
    }
}

impl fmt::Debug for SurfaceElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceElement")
            .field("role", &self.role())
            .field("name", &self.name())
            .finish()
    }
}
