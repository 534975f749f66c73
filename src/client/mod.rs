//! Backend client
//!
//! This module talks to the kitchen nerd backend over HTTP. The contract is
//! small: login, registration, the recipe list, and user profiles. Flows
//! depend on the [`Backend`] trait so tests can substitute a fake; the real
//! implementation is [`HttpBackend`].

pub mod http;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Profile, Recipe, Session};

pub use http::HttpBackend;

/// Error type for backend calls
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The backend rejected the login credentials (any non-2xx login reply)
    #[error("wrong credentials")]
    WrongCredentials,

    /// Any other non-success reply
    #[error("backend replied with status {status}: {message}")]
    Api { status: u16, message: String },

    /// Network failure, timeout, or an unreadable response body
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Pagination of the recipe list request, `size`/`page` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub size: u64,
    pub page: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        // Backend defaults: ten recipes, first page
        Self { size: 10, page: 1 }
    }
}

/// Body of a successful `POST /recipes/list`
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeList {
    /// Recipes in server order; a missing or null field reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination echo attached to the recipe list
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub size: u64,
    pub page: u64,
    pub total: u64,
}

/// The backend's HTTP surface, as consumed by the client flows
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange credentials for a session.
    ///
    /// Every non-2xx reply is a credential failure as far as the login flow
    /// is concerned; the detail is logged, not surfaced.
    async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError>;

    /// Create a new account
    async fn register(&self, username: &str, email: &str, password: &str)
        -> Result<(), ClientError>;

    /// Fetch one page of the recipe collection
    async fn list_recipes(&self, query: PageQuery) -> Result<RecipeList, ClientError>;

    /// Fetch a user's public profile, sending the bearer token when present
    async fn get_profile(&self, user_id: &str, token: Option<&str>)
        -> Result<Profile, ClientError>;
}

/// Decode `null` as an empty list, mirroring `data.recipes || []`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Recipe>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Recipe>>::deserialize(deserializer)?.unwrap_or_default())
}
