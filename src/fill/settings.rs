//! General-settings filler: title, device profile, times, servings, tips.
//!
//! Each sub-step is independently best-effort. A missing element or an
//! unexpected backend failure inside a sub-step is logged and the run moves
//! on to the next one; the host page stays usable either way.

use super::{selectors, FillContext};
use crate::errors::AutomationError;
use crate::parsers::split_hours;
use crate::recipe::RecipeDocument;
use tracing::{info, warn};

pub(crate) async fn fill(cx: &FillContext, doc: &RecipeDocument) -> Result<(), AutomationError> {
    if let Err(e) = set_title(cx, &doc.title).await {
        warn!(error = %e, "title sub-step failed, continuing");
    }
    if let Err(e) = enable_secondary_device(cx).await {
        warn!(error = %e, "device profile sub-step failed, continuing");
    }
    if let Err(e) = set_times(cx, doc.prep_minutes, doc.total_minutes).await {
        warn!(error = %e, "times sub-step failed, continuing");
    }
    if let Err(e) = set_servings(cx, doc.servings).await {
        warn!(error = %e, "servings sub-step failed, continuing");
    }
    if let Err(e) = set_tips(cx, &doc.tips).await {
        warn!(error = %e, "tips sub-step failed, continuing");
    }
    Ok(())
}

async fn set_title(cx: &FillContext, title: &str) -> Result<(), AutomationError> {
    cx.status("Updating the title...");

    let Some(field) = cx.find_or_skip(selectors::TITLE_FIELD, "title field").await else {
        return Ok(());
    };
    field.click().await?;
    cx.pause(cx.delays.action).await;
    field.set_text(title).await?;

    if let Some(confirm) = cx.try_find(selectors::INLINE_CONFIRM).await {
        confirm.click().await?;
        cx.pause(cx.delays.long).await;
    }
    info!(%title, "title set");
    Ok(())
}

/// Enable the secondary device profile in addition to the default one.
async fn enable_secondary_device(cx: &FillContext) -> Result<(), AutomationError> {
    cx.status("Enabling the secondary device profile...");

    let Some(trigger) = cx
        .find_or_skip(selectors::DEVICE_EDIT_TRIGGER, "device edit trigger")
        .await
    else {
        return Ok(());
    };
    trigger.click().await?;
    cx.pause(cx.delays.long).await;

    let Some(toggle) = cx
        .find_or_skip(selectors::SECONDARY_DEVICE_TOGGLE, "secondary device toggle")
        .await
    else {
        return Ok(());
    };
    if let Ok(false) = toggle.is_toggled().await {
        toggle.click().await?;
        info!("secondary device profile enabled");
        cx.pause(cx.delays.action).await;
    }

    if let Some(confirm) = cx.try_find(selectors::DEVICE_PANEL_CONFIRM).await {
        confirm.click().await?;
        cx.pause(cx.delays.long).await;
    }
    Ok(())
}

async fn set_times(cx: &FillContext, prep: u32, total: u32) -> Result<(), AutomationError> {
    cx.status("Setting preparation and total times...");

    let Some(tile) = cx.find_or_skip(selectors::TIME_TILE, "time tile").await else {
        return Ok(());
    };
    tile.click().await?;
    cx.pause(cx.delays.long).await;

    write_duration_fields(
        cx,
        prep,
        selectors::PREP_HOURS_INPUT,
        selectors::PREP_MINUTES_INPUT,
    )
    .await?;
    info!(minutes = prep, "preparation time set");

    if let Some(tab) = cx.try_find(selectors::TOTAL_TIME_TAB).await {
        tab.click().await?;
        cx.pause(cx.delays.action).await;
    }

    write_duration_fields(
        cx,
        total,
        selectors::TOTAL_HOURS_INPUT,
        selectors::TOTAL_MINUTES_INPUT,
    )
    .await?;
    info!(minutes = total, "total time set");

    confirm_panel(cx).await
}

/// Write only the non-zero hour/minute components of a duration into the
/// currently visible time tab.
async fn write_duration_fields(
    cx: &FillContext,
    total_minutes: u32,
    hours_selector: &str,
    minutes_selector: &str,
) -> Result<(), AutomationError> {
    let (hours, minutes) = split_hours(total_minutes);

    if hours > 0 {
        if let Some(input) = cx.try_find(hours_selector).await {
            input.set_text(&hours.to_string()).await?;
        }
    }
    if minutes > 0 {
        if let Some(input) = cx.try_find(minutes_selector).await {
            input.set_text(&minutes.to_string()).await?;
        }
    }
    Ok(())
}

async fn set_servings(cx: &FillContext, servings: u32) -> Result<(), AutomationError> {
    cx.status("Setting servings...");

    let Some(tile) = cx
        .find_or_skip(selectors::SERVINGS_TILE, "servings tile")
        .await
    else {
        return Ok(());
    };
    tile.click().await?;
    cx.pause(cx.delays.long).await;

    if let Some(tab) = cx.try_find(selectors::YIELD_TAB).await {
        tab.click().await?;
        cx.pause(cx.delays.action).await;
    }

    if let Some(input) = cx.try_find(selectors::YIELD_INPUT).await {
        input.set_text(&servings.to_string()).await?;
    }
    info!(servings, "servings set");

    confirm_panel(cx).await
}

async fn set_tips(cx: &FillContext, tips: &[String]) -> Result<(), AutomationError> {
    if tips.is_empty() {
        return Ok(());
    }
    cx.status("Adding tips...");

    if let Some(section) = cx.try_find(selectors::TIPS_SECTION).await {
        section.scroll_into_view().await?;
        cx.pause(cx.delays.commit).await;
    }

    let Some(field) = cx.find_or_skip(selectors::TIPS_FIELD, "tips field").await else {
        return Ok(());
    };
    field.click().await?;
    cx.pause(cx.delays.commit).await;
    field.set_text(&tips.join("\n\n")).await?;
    cx.pause(cx.delays.commit).await;

    if let Some(confirm) = cx.try_find(selectors::TIPS_CONFIRM).await {
        confirm.click().await?;
        cx.pause(cx.delays.long).await;
    }
    info!(count = tips.len(), "tips added");
    Ok(())
}

async fn confirm_panel(cx: &FillContext) -> Result<(), AutomationError> {
    if let Some(confirm) = cx.try_find(selectors::PANEL_CONFIRM).await {
        confirm.click().await?;
        cx.pause(cx.delays.long).await;
    }
    Ok(())
}
