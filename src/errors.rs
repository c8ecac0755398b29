use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid recipe document: {0}")]
    InvalidDocument(String),

    #[error("Page not recognized: {0}")]
    PageNotRecognized(String),

    #[error("Surface backend error: {0}")]
    SurfaceError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
