//! Error types for the gateway.
//!
//! [`GatewayError`] is the only error a route handler returns. Every variant
//! maps to a stable `kind`, an HTTP status and a client-safe message, and is
//! rendered through one JSON body shape:
//!
//! ```text
//! { "success": false, "kind": "upstream_request", "error": "Spotify API responded with 401 Unauthorized" }
//! ```
//!
//! The underlying error chain is logged on the server and never sent to the
//! client. [`SetupError`] covers failures while starting the process; those
//! are fatal.

use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::warning;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("missing required query parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("unknown or expired OAuth state")]
    InvalidState,

    #[error("Spotify authorization was denied: {0}")]
    AuthorizationDenied(String),

    #[error("Spotify token request failed: {0}")]
    UpstreamAuth(#[source] reqwest::Error),

    #[error("Spotify API request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl GatewayError {
    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingParameter(_) => "missing_parameter",
            GatewayError::InvalidState => "invalid_state",
            GatewayError::AuthorizationDenied(_) => "authorization_denied",
            GatewayError::UpstreamAuth(_) => "upstream_auth",
            GatewayError::Upstream(_) => "upstream_request",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Message that is safe to hand to the client.
    ///
    /// Upstream failures expose at most the status Spotify answered with.
    pub fn client_message(&self) -> String {
        match self {
            GatewayError::UpstreamAuth(err) => match err.status() {
                Some(status) => format!("Spotify token request responded with {}", status),
                None => "Spotify token request failed".to_string(),
            },
            GatewayError::Upstream(err) => match err.status() {
                Some(status) => format!("Spotify API responded with {}", status),
                None => "Spotify API request failed".to_string(),
            },
            other => other.to_string(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub kind: &'static str,
    pub error: String,
}

impl From<&GatewayError> for ErrorBody {
    fn from(err: &GatewayError) -> Self {
        ErrorBody {
            success: false,
            kind: err.kind(),
            error: err.client_message(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            GatewayError::UpstreamAuth(_) | GatewayError::Upstream(_)
        ) {
            warning!("{}", self);
        }

        (self.status(), Json(ErrorBody::from(&self))).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("environment variable {0} must be set")]
    MissingVar(&'static str),

    #[error("environment variable {name} has an invalid value: {value}")]
    InvalidVar { name: &'static str, value: String },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot load .env file {}: {detail}", path.display())]
    Env { path: PathBuf, detail: String },

    #[error("invalid TLS identity: {0}")]
    Tls(#[from] native_tls::Error),
}
