//! # Spotify Integration Module
//!
//! This module is the gateway's only way of talking to Spotify. It covers the
//! accounts service (token grants and the authorize URL) and the few Web API
//! reads the routes need.
//!
//! ## Overview
//!
//! Two types split the upstream capability from the caller's identity:
//!
//! - [`SpotifyClient`] is created once at startup and shared by every request.
//!   It owns the HTTP connection pool, the endpoints and the application's
//!   client credentials, and performs the token grants.
//! - [`UserSession`] is created per request from the `access_token` the caller
//!   sent. It shares the client's connection pool and carries the token
//!   explicitly into every Web API call, so two concurrent requests can never
//!   see each other's token.
//!
//! ```text
//! Route handler
//!      ↓ access_token from query
//! UserSession ──→ GET /me, /me/top/*, /search      (Bearer <user token>)
//!      ↓
//! SpotifyClient ──→ POST /api/token                (Basic <client id:secret>)
//!      ↓
//! reqwest (shared pool)
//! ```
//!
//! ## Submodules
//!
//! - [`auth`] - authorize URL, client-credentials, authorization-code and refresh grants
//! - [`profile`] - current user profile and top items
//! - [`search`] - artist and track search
//!
//! ## Error Handling
//!
//! No call is retried. Non-2xx responses and transport failures become
//! [`GatewayError::Upstream`] for Web API reads and
//! [`GatewayError::UpstreamAuth`] for token requests; the route layer turns
//! them into the JSON error contract.

pub mod auth;
pub mod profile;
pub mod search;

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::GatewayError,
    types::{ClientCredentials, SpotifyEndpoints},
};

/// Shared upstream capability: connection pool, endpoints and client credentials.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    credentials: Arc<ClientCredentials>,
    endpoints: Arc<SpotifyEndpoints>,
}

impl SpotifyClient {
    pub fn new(credentials: ClientCredentials, endpoints: SpotifyEndpoints) -> Self {
        SpotifyClient {
            http: Client::new(),
            credentials: Arc::new(credentials),
            endpoints: Arc::new(endpoints),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.credentials.clone(), config.endpoints.clone())
    }

    /// Binds a caller's access token to this client for one request.
    pub fn session(&self, access_token: impl Into<String>) -> UserSession {
        UserSession {
            client: self.clone(),
            access_token: access_token.into(),
        }
    }
}

/// Per-request view of the Web API on behalf of one access token.
#[derive(Debug, Clone)]
pub struct UserSession {
    client: SpotifyClient,
    access_token: String,
}

impl UserSession {
    /// Issues an authenticated GET against the Web API and decodes the body.
    ///
    /// `path` is appended to the configured API base URL, e.g. `/me`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.client.endpoints.api_url, path);

        let response = self
            .client
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}
