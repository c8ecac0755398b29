//! Phase executors and the run controller.
//!
//! Each executor is a finite sequence of surface interactions whose success
//! depends on timing and on the transient presence of host elements. The
//! propagation policy is uniform: failures are contained at the smallest
//! enclosing sub-step, and only document validation and "page not
//! recognized" abort a whole run.

pub mod ingredients;
pub mod settings;
pub mod steps;

use crate::element::SurfaceElement;
use crate::errors::AutomationError;
use crate::phase::{detect_phase, EditorPhase};
use crate::recipe::RecipeDocument;
use crate::timing::{suspend_for, Delays};
use crate::Surface;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Selector strings for the host editor's interactive elements, in the
/// crate's selector grammar. Kept in one place because the host owns this
/// vocabulary and renames it without notice.
pub(crate) mod selectors {
    pub const TITLE_FIELD: &str = "attr:name=name";
    pub const INLINE_CONFIRM: &str = "classname:core-inline-input__confirm";

    pub const DEVICE_EDIT_TRIGGER: &str = "classname:devices-edit-trigger >> role:button";
    pub const SECONDARY_DEVICE_TOGGLE: &str = "attr:value=TM7";
    pub const DEVICE_PANEL_CONFIRM: &str =
        "classname:devices-edit-modal >> attr:action=confirm";

    pub const TIME_TILE: &str = "classname:cr-recipe-settings-tiles__item >> nth:0";
    pub const SERVINGS_TILE: &str = "classname:cr-recipe-settings-tiles__item >> nth:2";
    pub const PREP_HOURS_INPUT: &str = "id:prepTime-tab >> attr:unit=hours";
    pub const PREP_MINUTES_INPUT: &str = "id:prepTime-tab >> attr:unit=minutes";
    pub const TOTAL_TIME_TAB: &str = "id:totalTime";
    pub const TOTAL_HOURS_INPUT: &str = "id:totalTime-tab >> attr:unit=hours";
    pub const TOTAL_MINUTES_INPUT: &str = "id:totalTime-tab >> attr:unit=minutes";
    pub const YIELD_TAB: &str = "id:recipeYield";
    pub const YIELD_INPUT: &str = "id:recipeYield-tab >> attr:type=number";
    pub const PANEL_CONFIRM: &str = "attr:action=confirm";

    pub const TIPS_SECTION: &str = "id:tips-section";
    pub const TIPS_FIELD: &str = "attr:name=hints";
    pub const TIPS_CONFIRM: &str = "id:tips-section >> classname:core-inline-input__confirm";

    pub const INGREDIENT_FIELDS: &str =
        "classname:cr-manage-ingredients >> attr:contenteditable=true";

    pub const STEP_FIELDS: &str = "attr:trigger-id=add-steps >> attr:contenteditable=true";
    pub const ACTIVE_STEP_PARAMS: &str =
        "attr:active=true >> classname:cr-text-field-actions__tts";
    pub const ACTIVE_STEP_ATTACH: &str =
        "attr:active=true >> classname:cr-text-field-actions__ingredient";

    pub const PARAMS_MINUTES_INPUT: &str =
        "classname:cr-tts-time >> attr:aria-describedby=minutes";
    pub const PARAMS_SECONDS_INPUT: &str =
        "classname:cr-tts-time >> attr:aria-describedby=seconds";
    pub const TEMPERATURE_EXPAND_HEADER: &str =
        "classname:cr-tts-temperature >> attr:isexpanded=false >> classname:core-expand__header";
    pub const SPEED_EXPAND_HEADER: &str =
        "classname:cr-tts-speed >> attr:isexpanded=false >> classname:core-expand__header";
    pub const REVERSE_DIRECTION_RADIO: &str = "attr:for=direction-radio-CCW";
    pub const PARAMS_SAVE: &str = "classname:cr-popover-modal__save";

    pub const PICKER_PANEL: &str = "classname:cr-ingredient-modal__add-tabpanel";
    pub const PICKER_INPUT: &str = "attr:aria-describedby=add-description";
    pub const PICKER_ADD: &str = "classname:cr-ingredient-modal__plus-button";

    pub fn temperature_radio(value: u32) -> String {
        format!("attr:for=temperature-radio-{value}")
    }

    pub fn speed_radio(token: &str) -> String {
        format!("attr:for=speed-radio-{token}")
    }
}

/// The presentation chrome's two capabilities, seen from the engine:
/// show a one-line progress/error message, and disable operator input
/// while a run is in flight.
pub trait OperatorPanel: Send + Sync {
    fn status(&self, message: &str);
    fn set_busy(&self, _busy: bool) {}
}

/// Panel that only forwards status lines to the log. Useful for embeddings
/// without chrome and for tests.
pub struct NullPanel;

impl OperatorPanel for NullPanel {
    fn status(&self, message: &str) {
        debug!(%message, "status");
    }
}

/// How a completed run ended, with the message shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    SettingsFilled,
    IngredientsFilled,
    StepsFilled,
    /// The page was a recognized recipe editor, but none of the three
    /// fillable views.
    NavigateFirst,
}

impl RunOutcome {
    pub fn user_message(&self) -> &'static str {
        match self {
            RunOutcome::SettingsFilled => {
                "Main page filled. Now open the ingredients page to continue."
            }
            RunOutcome::IngredientsFilled => {
                "Ingredients added. Now open the steps page to continue."
            }
            RunOutcome::StepsFilled => "Steps added. The recipe is complete.",
            RunOutcome::NavigateFirst => {
                "Navigate to the main, ingredients or steps page of the recipe to continue."
            }
        }
    }
}

/// Shared state for one run, handed to the phase executors.
pub(crate) struct FillContext {
    pub surface: Surface,
    pub panel: Arc<dyn OperatorPanel>,
    pub delays: Delays,
}

impl FillContext {
    pub fn status(&self, message: &str) {
        debug!(%message, "progress");
        self.panel.status(message);
    }

    pub async fn pause(&self, duration: Duration) {
        suspend_for(duration).await;
    }

    pub async fn try_find(&self, selector: &str) -> Option<SurfaceElement> {
        self.surface.try_find(selector).await
    }

    /// Best-effort lookup: absence is logged as a skipped sub-step.
    pub async fn find_or_skip(&self, selector: &str, what: &str) -> Option<SurfaceElement> {
        let found = self.surface.try_find(selector).await;
        if found.is_none() {
            warn!(selector, "{what} not found, skipping");
        }
        found
    }

    pub async fn type_characters(
        &self,
        target: &SurfaceElement,
        text: &str,
    ) -> Result<(), AutomationError> {
        self.surface
            .type_characters(target, text, self.delays.typing)
            .await
    }
}

/// The run controller: validates operator input, detects the editor phase
/// and dispatches to the matching phase executor.
pub struct RecipeFiller {
    surface: Surface,
    panel: Arc<dyn OperatorPanel>,
    delays: Delays,
}

impl RecipeFiller {
    pub fn new(surface: Surface, panel: Arc<dyn OperatorPanel>) -> Self {
        Self {
            surface,
            panel,
            delays: Delays::standard(),
        }
    }

    /// Override the suspension constants, e.g. for a scripted backend.
    pub fn with_delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }

    /// Run one filling pass with the operator's raw document text.
    ///
    /// Validation happens before any surface interaction. Operator input is
    /// disabled for the duration of the run; there is no cancellation once
    /// a run starts. The status line always ends on the most specific known
    /// outcome.
    #[instrument(skip(self, raw_json))]
    pub async fn run(&self, raw_json: &str) -> Result<RunOutcome, AutomationError> {
        let doc = match RecipeDocument::from_json(raw_json) {
            Ok(doc) => doc,
            Err(e) => {
                self.panel.status(&e.to_string());
                return Err(e);
            }
        };

        self.panel.set_busy(true);
        self.panel.status("Starting the filling run...");
        let result = self.dispatch(&doc).await;
        self.panel.set_busy(false);

        match &result {
            Ok(outcome) => self.panel.status(outcome.user_message()),
            Err(e) => self.panel.status(&format!("Error: {e}")),
        }
        result
    }

    async fn dispatch(&self, doc: &RecipeDocument) -> Result<RunOutcome, AutomationError> {
        let url = self.surface.current_url()?;
        let page = detect_phase(&url)?;
        info!(recipe_id = %page.recipe_id, phase = ?page.phase, "detected editor phase");

        let cx = FillContext {
            surface: self.surface.clone(),
            panel: self.panel.clone(),
            delays: self.delays,
        };

        match page.phase {
            EditorPhase::GeneralSettings => {
                settings::fill(&cx, doc).await?;
                Ok(RunOutcome::SettingsFilled)
            }
            EditorPhase::Ingredients => {
                ingredients::fill(&cx, doc).await?;
                Ok(RunOutcome::IngredientsFilled)
            }
            EditorPhase::Steps => {
                steps::fill(&cx, doc).await?;
                Ok(RunOutcome::StepsFilled)
            }
            EditorPhase::Unknown => Ok(RunOutcome::NavigateFirst),
        }
    }
}
