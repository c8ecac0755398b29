//! The validated, immutable in-memory representation of a recipe.
//!
//! The raw input is operator-pasted JSON, typically produced by an external
//! text-generation tool. Field aliases accept both the schema names and the
//! original French export names, since both circulate in the wild.

use crate::errors::AutomationError;
use serde::Deserialize;

fn default_prep_minutes() -> u32 {
    20
}

fn default_total_minutes() -> u32 {
    40
}

fn default_servings() -> u32 {
    4
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDocument {
    #[serde(alias = "titre", default)]
    pub title: String,
    #[serde(alias = "tempsPreparation", default = "default_prep_minutes")]
    pub prep_minutes: u32,
    #[serde(alias = "tempsTotal", default = "default_total_minutes")]
    pub total_minutes: u32,
    #[serde(alias = "portions", default = "default_servings")]
    pub servings: u32,
    #[serde(alias = "ingredients", default)]
    pub ingredient_groups: Vec<IngredientGroup>,
    #[serde(alias = "etapes", default)]
    pub steps: Vec<RecipeStep>,
    #[serde(alias = "conseils", default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroup {
    #[serde(alias = "categorie")]
    pub category_label: String,
    pub items: Vec<IngredientItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientItem {
    #[serde(alias = "nom")]
    pub name: String,
    #[serde(alias = "quantite", default)]
    pub quantity: Option<String>,
    #[serde(alias = "unite", default)]
    pub unit: Option<String>,
    #[serde(alias = "notes", default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    #[serde(alias = "titre")]
    pub title: String,
    pub description: String,
    /// Free text, e.g. "12 min 30 sec"; parsed on demand.
    #[serde(alias = "duree", default)]
    pub duration: Option<String>,
    /// Free text, e.g. "120°"; parsed on demand.
    #[serde(default)]
    pub temperature: Option<String>,
    /// Free text, e.g. "Vitesse 5.5"; parsed on demand.
    #[serde(alias = "vitesse", default)]
    pub speed: Option<String>,
    #[serde(alias = "details", default)]
    pub detail: Option<String>,
    /// Names of ingredients to attach to this step in the host's picker.
    #[serde(alias = "ingredients", default)]
    pub step_ingredients: Vec<String>,
}

impl RecipeDocument {
    /// Parse and validate operator input.
    ///
    /// This is the run's only validation gate; it happens before any
    /// surface interaction, and failure aborts the whole run.
    pub fn from_json(raw: &str) -> Result<Self, AutomationError> {
        let doc: Self = serde_json::from_str(raw.trim())
            .map_err(|e| AutomationError::InvalidDocument(format!("input is not valid JSON: {e}")))?;
        doc.validate()?;
        Ok(doc)
    }

    fn validate(&self) -> Result<(), AutomationError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.ingredient_groups.is_empty() {
            missing.push("ingredientGroups");
        }
        if self.steps.is_empty() {
            missing.push("steps");
        }
        if !missing.is_empty() {
            return Err(AutomationError::InvalidDocument(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        if self.servings == 0 {
            return Err(AutomationError::InvalidDocument(
                "servings must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
