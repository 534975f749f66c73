//! View engine
//!
//! This module renders the client's two pages with Tera. Templates are
//! embedded in the binary; the element ids of the original pages
//! (`navContent`, `recipeContainer`, `emailError`, `passwordError`,
//! `loginError`, `recipesStatus`) are kept so rendered output stays
//! inspectable by id.

pub mod cards;
pub mod image;

mod error;

use rust_embed::RustEmbed;
use serde::Serialize;
use tera::{Context as TeraContext, Tera};

pub use cards::{build_cards, nav_link, NavLink, RecipeCard};
pub use error::ViewError;
pub use image::{decode_data_uri, DecodedImage, ImageError};

/// Shown on the recipes page when the fetch fails
pub const RECIPES_STATUS_ERROR: &str = "Could not load recipes. Please try again later.";

#[derive(RustEmbed)]
#[folder = "src/view/templates"]
#[include = "*.html"]
struct Templates;

/// View model for the login page
#[derive(Debug, Clone, Serialize)]
pub struct LoginPage {
    pub nav: NavLink,
    /// Echoed email field value
    pub email: String,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub login_error: Option<String>,
}

impl LoginPage {
    /// An empty login form under the given nav link
    pub fn new(nav: NavLink) -> Self {
        Self {
            nav,
            email: String::new(),
            email_error: None,
            password_error: None,
            login_error: None,
        }
    }
}

/// View model for the recipe list page
#[derive(Debug, Clone, Serialize)]
pub struct RecipesPage {
    pub nav: NavLink,
    pub cards: Vec<RecipeCard>,
    /// User-visible fetch status; `None` when the load succeeded
    pub status: Option<String>,
}

/// Renders pages from the embedded templates
pub struct ViewEngine {
    tera: Tera,
}

impl ViewEngine {
    /// Build the engine from the embedded templates
    pub fn new() -> Result<Self, ViewError> {
        let mut templates: Vec<(String, String)> = Vec::new();
        for name in Templates::iter() {
            let file = Templates::get(&name).ok_or_else(|| ViewError::Encoding(name.to_string()))?;
            let content = String::from_utf8(file.data.into_owned())
                .map_err(|_| ViewError::Encoding(name.to_string()))?;
            templates.push((name.to_string(), content));
        }

        // Base templates go in first so inheritance resolves
        templates.sort_by(|a, b| {
            let a_is_base = a.0 == "base.html";
            let b_is_base = b.0 == "base.html";
            b_is_base.cmp(&a_is_base)
        });

        let mut tera = Tera::default();
        for (name, content) in templates {
            tera.add_raw_template(&name, &content)?;
        }
        tera.build_inheritance_chains()?;

        Ok(Self { tera })
    }

    /// Render the login page
    pub fn render_login(&self, page: &LoginPage) -> Result<String, ViewError> {
        Ok(self
            .tera
            .render("login.html", &TeraContext::from_serialize(page)?)?)
    }

    /// Render the recipe list page
    pub fn render_recipes(&self, page: &RecipesPage) -> Result<String, ViewError> {
        Ok(self
            .tera
            .render("recipes.html", &TeraContext::from_serialize(page)?)?)
    }
}
