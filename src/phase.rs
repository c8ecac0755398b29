//! Classifies the host UI's current location into an editor phase.
//!
//! The recipe editor spreads its form over three separate navigations; the
//! engine infers which one is showing from the URL alone and runs the
//! matching phase executor against it.

use crate::errors::AutomationError;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// Path shape of an editable created recipe: /created-recipes/<locale>/<id>
static RECIPE_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/created-recipes/([a-z]{2}-[A-Z]{2})/([A-Za-z0-9]+)").unwrap());

/// One of the three UI contexts the filling flow runs against, or Unknown
/// when the page belongs to the editor but matches none of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    GeneralSettings,
    Ingredients,
    Steps,
    Unknown,
}

/// The detected location: an opaque recipe identifier plus the phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub recipe_id: String,
    pub locale: String,
    pub phase: EditorPhase,
}

/// Classify `url`.
///
/// A URL without the created-recipe path shape is not an editable recipe
/// page at all and aborts the run; a recognized recipe page in an
/// unexpected sub-view yields [`EditorPhase::Unknown`], which is fed back
/// to the operator as "navigate to a valid page" rather than an error.
pub fn detect_phase(url: &str) -> Result<PageContext, AutomationError> {
    let caps = RECIPE_PATH_RE.captures(url).ok_or_else(|| {
        AutomationError::PageNotRecognized(
            "the current page is not a recipe editor; open one of your created recipes for editing"
                .to_string(),
        )
    })?;
    let locale = caps[1].to_string();
    let recipe_id = caps[2].to_string();

    let phase = if url.contains("active=ingredients") {
        EditorPhase::Ingredients
    } else if url.contains("active=steps") {
        EditorPhase::Steps
    } else if url.contains("/edit") && !url.contains("ingredients-and-preparation") {
        EditorPhase::GeneralSettings
    } else {
        EditorPhase::Unknown
    };

    debug!(%recipe_id, %locale, ?phase, "classified editor location");
    Ok(PageContext {
        recipe_id,
        locale,
        phase,
    })
}
