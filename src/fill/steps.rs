//! Steps filler, with the cooking-parameters setter and the step-ingredient
//! attacher.
//!
//! Steps are written into the host's steps-adding list the same way
//! ingredients are: re-query the last field, type, commit with Enter. On
//! top of that each step may carry cooking parameters (duration,
//! temperature, speed) set through a popover, and ingredient references
//! attached through a picker panel. Both extras are best-effort: a failure
//! in either skips that enhancement for the step, never the step itself.

use super::{selectors, FillContext};
use crate::errors::AutomationError;
use crate::parsers::{parse_duration, parse_speed, parse_temperature};
use crate::recipe::{RecipeDocument, RecipeStep};
use tracing::{debug, warn};

/// The host keyword (in its source locale) marking counter-rotation in a
/// step's free-text detail.
const REVERSE_KEYWORD: &str = "inverse";

pub(crate) async fn fill(cx: &FillContext, doc: &RecipeDocument) -> Result<(), AutomationError> {
    cx.status("Adding steps...");
    let total = doc.steps.len();

    for (index, step) in doc.steps.iter().enumerate() {
        cx.status(&format!("Step {}/{}...", index + 1, total));

        let text = format!("{} : {}", step.title, step.description);
        let fields = cx.surface.find_all(selectors::STEP_FIELDS).await?;
        let Some(field) = fields.last() else {
            warn!(index, "no step input field present, skipping step");
            continue;
        };

        field.click().await?;
        field.focus().await?;
        cx.pause(cx.delays.action).await;

        field.clear().await?;
        cx.type_characters(field, &text).await?;
        // The host only reveals the per-step action buttons once the field
        // ends in a space.
        field.insert_text(" ").await?;
        cx.pause(cx.delays.action).await;

        field.scroll_into_view().await?;
        field.click().await?;
        cx.pause(cx.delays.commit).await;
        field.set_caret_to_end().await?;
        cx.pause(cx.delays.action).await;

        if let Err(e) = set_cooking_parameters(cx, step).await {
            warn!(index, error = %e, "cooking parameters skipped for this step");
        }

        field.focus().await?;
        cx.pause(cx.delays.action).await;

        if !step.step_ingredients.is_empty() {
            attach_step_ingredients(cx, &step.step_ingredients).await;
        }

        // Commit with Enter on every step except the last to advance to
        // the next step slot.
        if index + 1 < total {
            field.press_key("Enter").await?;
            cx.pause(cx.delays.popover).await;
        }
        debug!(index, "step completed");
    }

    debug!(total, "all steps written");
    Ok(())
}

/// Set duration, temperature and speed for the active step through the
/// parameters popover. Partial data is the normal case: each absent field
/// simply skips its block.
async fn set_cooking_parameters(cx: &FillContext, step: &RecipeStep) -> Result<(), AutomationError> {
    let Some(button) = cx.try_find(selectors::ACTIVE_STEP_PARAMS).await else {
        return Ok(());
    };
    button.click().await?;
    cx.pause(cx.delays.popover).await;

    if let Some(duration) = step.duration.as_deref() {
        let parsed = parse_duration(duration);
        if parsed.minutes > 0 {
            if let Some(input) = cx.try_find(selectors::PARAMS_MINUTES_INPUT).await {
                input.set_text(&parsed.minutes.to_string()).await?;
            }
        }
        if parsed.seconds > 0 {
            if let Some(input) = cx.try_find(selectors::PARAMS_SECONDS_INPUT).await {
                input.set_text(&parsed.seconds.to_string()).await?;
            }
        }
    }

    if let Some(temperature) = step.temperature.as_deref() {
        if let Some(value) = parse_temperature(temperature) {
            // Expand the section if the host rendered it collapsed.
            if let Some(header) = cx.try_find(selectors::TEMPERATURE_EXPAND_HEADER).await {
                header.click().await?;
                cx.pause(cx.delays.action).await;
            }
            if let Some(radio) = cx.try_find(&selectors::temperature_radio(value)).await {
                radio.click().await?;
            }
        }
    }

    if let Some(speed_text) = step.speed.as_deref() {
        if let Some(token) = parse_speed(speed_text) {
            if let Some(header) = cx.try_find(selectors::SPEED_EXPAND_HEADER).await {
                header.click().await?;
                cx.pause(cx.delays.action).await;
            }
            let reverse = step
                .detail
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(REVERSE_KEYWORD));
            if reverse {
                if let Some(radio) = cx.try_find(selectors::REVERSE_DIRECTION_RADIO).await {
                    radio.click().await?;
                    cx.pause(cx.delays.action).await;
                }
            }
            if let Some(radio) = cx.try_find(&selectors::speed_radio(&token)).await {
                radio.click().await?;
            }
        }
    }

    if let Some(save) = cx.try_find(selectors::PARAMS_SAVE).await {
        save.click().await?;
        cx.pause(cx.delays.commit).await;
    }
    Ok(())
}

/// Attach each referenced ingredient to the active step through the picker
/// panel. Each ingredient is handled independently; one failure never
/// aborts the remaining ones.
async fn attach_step_ingredients(cx: &FillContext, ingredients: &[String]) {
    for ingredient in ingredients {
        if let Err(e) = attach_one(cx, ingredient).await {
            warn!(%ingredient, error = %e, "could not attach ingredient to step");
        }
    }
}

async fn attach_one(cx: &FillContext, ingredient: &str) -> Result<(), AutomationError> {
    let Some(button) = cx.try_find(selectors::ACTIVE_STEP_ATTACH).await else {
        return Ok(());
    };
    button.click().await?;
    cx.pause(cx.delays.commit).await;

    // The picker renders asynchronously; this is the engine's one bounded
    // wait. A timeout skips this ingredient only.
    cx.surface
        .locator(selectors::PICKER_PANEL)
        .set_poll_interval(cx.delays.poll_interval)
        .wait(Some(cx.delays.presence_timeout))
        .await?;
    cx.pause(cx.delays.action).await;

    let Some(input) = cx.find_or_skip(selectors::PICKER_INPUT, "picker input").await else {
        return Ok(());
    };
    input.clear().await?;
    input.focus().await?;
    cx.pause(cx.delays.action).await;
    cx.type_characters(&input, ingredient).await?;
    cx.pause(cx.delays.action).await;

    if let Some(add) = cx.try_find(selectors::PICKER_ADD).await {
        add.click().await?;
        cx.pause(cx.delays.popover).await;
    }
    debug!(%ingredient, "ingredient attached to step");
    Ok(())
}
