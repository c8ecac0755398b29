//! Ingredients filler.
//!
//! The host's ingredient editor is a flat list of contenteditable fields
//! that appends a fresh empty field after each committed entry. Category
//! headers are written as pseudo-entries interleaved positionally with
//! their items, so the rendered list keeps the document's grouping.

use super::{selectors, FillContext};
use crate::errors::AutomationError;
use crate::recipe::{IngredientItem, RecipeDocument};
use tracing::{debug, warn};

/// Flatten the document's ingredient groups into the ordered list of
/// display strings the host receives, one entry per committed field.
pub fn flatten_entries(doc: &RecipeDocument) -> Vec<String> {
    let mut entries = Vec::new();
    for group in &doc.ingredient_groups {
        entries.push(format!("--- {} ---", group.category_label));
        for item in &group.items {
            entries.push(format_item(item));
        }
    }
    entries
}

// "{quantity} {unit} {name} ({note})" with empty components and their
// trailing spaces omitted.
fn format_item(item: &IngredientItem) -> String {
    let mut text = String::new();
    if let Some(quantity) = item.quantity.as_deref().filter(|q| !q.is_empty()) {
        text.push_str(quantity);
        text.push(' ');
    }
    if let Some(unit) = item.unit.as_deref().filter(|u| !u.is_empty()) {
        text.push_str(unit);
        text.push(' ');
    }
    text.push_str(&item.name);
    if let Some(note) = item.note.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(" (");
        text.push_str(note);
        text.push(')');
    }
    text.trim().to_string()
}

pub(crate) async fn fill(cx: &FillContext, doc: &RecipeDocument) -> Result<(), AutomationError> {
    cx.status("Adding ingredients...");

    let entries = flatten_entries(doc);
    let total = entries.len();

    for (index, entry) in entries.iter().enumerate() {
        cx.status(&format!("Ingredient {}/{}...", index + 1, total));

        // The host appends a fresh empty field after each commit; the last
        // field present is always the one to write into.
        let fields = cx.surface.find_all(selectors::INGREDIENT_FIELDS).await?;
        let Some(field) = fields.last() else {
            warn!(index, "no ingredient input field present, skipping entry");
            continue;
        };

        field.click().await?;
        field.focus().await?;
        cx.pause(cx.delays.action).await;

        field.clear().await?;
        cx.type_characters(field, entry).await?;
        cx.pause(cx.delays.action).await;

        // Commit with Enter on every entry except the last, then give the
        // host time to render the next empty field.
        if index + 1 < total {
            field.press_key("Enter").await?;
            cx.pause(cx.delays.commit).await;
        }
        debug!(index, entry = %entry, "ingredient entry written");
    }

    debug!(total, "all ingredient entries written");
    Ok(())
}
