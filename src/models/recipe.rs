//! Recipe model
//!
//! Recipes are transient: fetched from the backend, rendered, and dropped.
//! The wire format is tolerated rather than trusted - `ingredients` in
//! particular may be absent, null, or not an array at all, and every such
//! shape renders as "No ingredients" instead of failing the whole list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Rendered when a recipe carries no usable ingredient list
pub const NO_INGREDIENTS: &str = "No ingredients";

/// A backend-supplied recipe record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    /// Photo as a base64 data URI, used verbatim as an image source
    #[serde(default)]
    pub photo_base64: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Ordered ingredient list; `None` when absent or malformed
    #[serde(default, deserialize_with = "lenient_ingredients")]
    pub ingredients: Option<Vec<Ingredient>>,
}

impl Recipe {
    /// Comma-joined ingredient names in received order, or [`NO_INGREDIENTS`]
    /// when the list is absent, malformed, or empty.
    pub fn ingredient_summary(&self) -> String {
        match &self.ingredients {
            Some(list) if !list.is_empty() => list
                .iter()
                .map(|ingredient| ingredient.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => NO_INGREDIENTS.to_string(),
        }
    }
}

/// One entry of a recipe's ingredient list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default, rename = "recipeID")]
    pub recipe_id: Option<Uuid>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub optional: bool,
}

/// Accept any JSON shape for `ingredients` and keep only a well-formed array.
fn lenient_ingredients<'de, D>(deserializer: D) -> Result<Option<Vec<Ingredient>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
