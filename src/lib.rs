//! kitchen-nerd - client-side flows for the kitchen nerd recipe service
//!
//! This library implements the client half of the kitchen nerd recipe
//! application: the cached login session, the login flow, and the recipe
//! list view. The backend is an external collaborator reached over HTTP.

pub mod auth;
pub mod client;
pub mod config;
pub mod models;
pub mod pages;
pub mod store;
pub mod view;
