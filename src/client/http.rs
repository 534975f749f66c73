//! HTTP backend implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::client::{Backend, ClientError, PageQuery, RecipeList};
use crate::config::BackendConfig;
use crate::models::{Profile, Session};

/// Backend reached over HTTP with a shared reqwest client
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of `POST /auth/register`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
    repeated_password: &'a str,
}

/// Error body the backend attaches to non-success replies
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HttpBackend {
    /// Build a client for the configured backend.
    ///
    /// The request timeout comes from configuration; the original client had
    /// none and a stalled request simply never resolved.
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pull the `error` field out of a failure reply, falling back to the
    /// status line when the body is not the expected JSON.
    async fn failure_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        }
    }

    /// Map a non-success reply to [`ClientError::Api`]
    async fn api_error(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let message = Self::failure_message(response).await;
        ClientError::Api { status, message }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let response = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = Self::failure_message(response).await;
            tracing::debug!(%status, %message, "login rejected");
            return Err(ClientError::WrongCredentials);
        }

        Ok(response.json::<Session>().await?)
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint("/auth/register"))
            .json(&RegisterRequest {
                email,
                username,
                password,
                repeated_password: password,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(())
    }

    async fn list_recipes(&self, query: PageQuery) -> Result<RecipeList, ClientError> {
        // A POST with empty body; paging travels in the query string.
        let response = self
            .http
            .post(self.endpoint("/recipes/list"))
            .query(&[("size", query.size), ("page", query.page)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Self::api_error(response).await);
        }

        Ok(response.json::<RecipeList>().await?)
    }

    async fn get_profile(
        &self,
        user_id: &str,
        token: Option<&str>,
    ) -> Result<Profile, ClientError> {
        let url = self.endpoint(&format!("/users/{}", urlencoding::encode(user_id)));
        let mut request = self.http.post(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.json::<Profile>().await?)
    }
}
