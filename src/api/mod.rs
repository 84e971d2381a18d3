//! # API Module
//!
//! This module provides the HTTP routes of the gateway. Every route is a
//! stateless request/response mapping: it takes the caller's access token
//! and parameters from the query string, calls Spotify once or a few times
//! and answers with a narrow JSON view.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - redirects to Spotify's authorize page with a fresh `state`
//! - [`spotify_redirect`] - verifies `state`, exchanges the code and sends the
//!   browser back to the front end with the access token
//! - [`refresh`] - trades a refresh token for a new access token
//!
//! ### Data
//!
//! - [`profile`] - user profile with top artists and top tracks
//! - [`search_artists`] / [`search_songs`] - catalog search
//! - [`my_top_tracks`] - flattened top tracks with time range and limit
//!
//! ### Monitoring
//!
//! - [`health`] - status, version and the state of the stored token
//!
//! ## Per-request sessions
//!
//! Data routes take a [`UserSession`](crate::spotify::UserSession) argument.
//! Its extractor reads `access_token` from the query string and rejects the
//! request with `400 missing_parameter` before anything reaches Spotify.
//!
//! ## Errors
//!
//! Handlers return [`GatewayError`](crate::error::GatewayError), which renders
//! the same JSON body for every failure.
//!
//! Anything not matched by a route is served from the static front-end
//! directory.

mod health;
mod login;
mod profile;
mod search;
mod session;
mod tracks;

pub use health::health;
pub use login::login;
pub use login::refresh;
pub use login::spotify_redirect;
pub use profile::profile;
pub use search::search_artists;
pub use search::search_songs;
pub use tracks::my_top_tracks;

use std::sync::Arc;

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::{
    config::Config,
    management::{CredentialStore, StateManager},
    spotify::SpotifyClient,
};

/// Everything the handlers share. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: SpotifyClient,
    pub credentials: CredentialStore,
    pub states: StateManager,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            spotify: SpotifyClient::from_config(&config),
            config: Arc::new(config),
            credentials: CredentialStore::new(),
            states: StateManager::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health))
        .route("/login", get(login))
        .route("/spotify-redirect", get(spotify_redirect))
        .route("/refresh", get(refresh))
        .route("/profile", get(profile))
        .route("/search", get(search_artists))
        .route("/search/songs", get(search_songs))
        .route("/my-top-tracks", get(my_top_tracks))
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `302 Found` to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
