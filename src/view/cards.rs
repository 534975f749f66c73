//! Card and nav-link view models
//!
//! Construction is pure: given a recipe or session, these functions build
//! the values the templates interpolate, with no I/O of any kind.

use serde::Serialize;

use crate::models::{Recipe, Session};
use crate::view::image::decode_data_uri;

/// View model for one recipe card
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCard {
    pub title: String,
    /// Image source; only set when the photo is a well-formed data URI
    pub photo_src: Option<String>,
    /// Comma-joined ingredient names, or "No ingredients"
    pub ingredients_text: String,
}

impl RecipeCard {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let photo_src = match decode_data_uri(&recipe.photo_base64) {
            Ok(_) => Some(recipe.photo_base64.clone()),
            Err(e) => {
                if !recipe.photo_base64.is_empty() {
                    tracing::debug!(title = %recipe.title, error = %e, "recipe photo is not a usable data URI");
                }
                None
            }
        };

        Self {
            title: recipe.title.clone(),
            photo_src,
            ingredients_text: recipe.ingredient_summary(),
        }
    }
}

/// Build cards for a fetched recipe collection, preserving server order
pub fn build_cards(recipes: &[Recipe]) -> Vec<RecipeCard> {
    recipes.iter().map(RecipeCard::from_recipe).collect()
}

/// View model for the single nav-bar link
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

/// Build the nav link: a profile link for a valid session, a login link
/// otherwise. An expired session gets the login link.
pub fn nav_link(base_url: &str, session: Option<&Session>) -> NavLink {
    match session {
        Some(session) if session.is_valid() => NavLink {
            href: format!(
                "{}/users/{}",
                base_url,
                urlencoding::encode(&session.user_id)
            ),
            label: session.username.clone(),
        },
        _ => NavLink {
            href: format!("{base_url}/auth/login"),
            label: "Login".to_string(),
        },
    }
}
