//! Configuration management for the Spotify gateway.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files, and turns them into a typed [`Config`] once at
//! startup. Handlers never read the environment themselves.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. An explicit env file passed on the command line
//! 3. `.env` in the working directory
//! 4. `.env` in the local data directory
//! 5. Application defaults (where applicable)

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Url;

use crate::{
    error::SetupError,
    types::{ClientCredentials, SpotifyEndpoints},
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Client-credentials tokens live for an hour; refresh well before that.
pub const DEFAULT_TOKEN_REFRESH_SECS: u64 = 50 * 60;

/// Loads environment variables from `.env` files.
///
/// When `env_file` is given, only that file is read and it must exist.
/// Otherwise `./.env` and `<data_local_dir>/sporlgate/.env` are read if
/// present. Variables that are already set in the process environment are
/// never overwritten.
///
/// The data directory is created so users have a known place for their
/// `.env` file:
/// - Linux: `~/.local/share/sporlgate/.env`
/// - macOS: `~/Library/Application Support/sporlgate/.env`
/// - Windows: `%LOCALAPPDATA%/sporlgate/.env`
pub async fn load_env(env_file: Option<&Path>) -> Result<(), SetupError> {
    if let Some(path) = env_file {
        return load_env_file(path);
    }

    let local = PathBuf::from(".env");
    if local.is_file() {
        load_env_file(&local)?;
    }

    let data_env = data_env_path();
    if let Some(parent) = data_env.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|source| SetupError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    if data_env.is_file() {
        load_env_file(&data_env)?;
    }

    Ok(())
}

fn load_env_file(path: &Path) -> Result<(), SetupError> {
    dotenv::from_path(path).map_err(|e| SetupError::Env {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

fn data_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlgate/.env");
    path
}

/// Typed runtime configuration, loaded once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: ClientCredentials,
    pub endpoints: SpotifyEndpoints,
    /// Front-end base URL the user lands on after logging in (`URI`).
    pub frontend_uri: Url,
    pub port: u16,
    pub pfx_path: PathBuf,
    pub pfx_passphrase: String,
    pub static_dir: PathBuf,
    pub token_refresh_interval: Duration,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, SetupError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingVar`] when a required variable is absent
    /// and [`SetupError::InvalidVar`] when a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SetupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, SetupError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(SetupError::MissingVar(name)),
            }
        };
        let optional = |name: &'static str, default: &str| -> String {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let credentials = ClientCredentials {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: required("REDIRECT_URI")?,
        };

        let auth_url = optional("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL);
        let endpoints = SpotifyEndpoints {
            api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
                .trim_end_matches('/')
                .to_string(),
            auth_url: Url::parse(&auth_url).map_err(|_| SetupError::InvalidVar {
                name: "SPOTIFY_API_AUTH_URL",
                value: auth_url.clone(),
            })?,
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
        };

        let uri = required("URI")?;
        let frontend_uri = Url::parse(&uri).map_err(|_| SetupError::InvalidVar {
            name: "URI",
            value: uri.clone(),
        })?;

        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| SetupError::InvalidVar {
                    name: "PORT",
                    value: value.clone(),
                })?,
            None => DEFAULT_PORT,
        };

        let refresh_secs = match lookup("TOKEN_REFRESH_INTERVAL_SECS")
            .filter(|v| !v.trim().is_empty())
        {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(SetupError::InvalidVar {
                        name: "TOKEN_REFRESH_INTERVAL_SECS",
                        value,
                    });
                }
            },
            None => DEFAULT_TOKEN_REFRESH_SECS,
        };

        // An empty passphrase is valid for unprotected bundles, so only
        // presence is checked here.
        let pfx_passphrase =
            lookup("PFX_PASSPHRASE").ok_or(SetupError::MissingVar("PFX_PASSPHRASE"))?;

        Ok(Config {
            credentials,
            endpoints,
            frontend_uri,
            port,
            pfx_path: PathBuf::from(required("PFX_PATH")?),
            pfx_passphrase,
            static_dir: PathBuf::from(optional("STATIC_DIR", DEFAULT_STATIC_DIR)),
            token_refresh_interval: Duration::from_secs(refresh_secs),
        })
    }

    /// URL the browser is sent to after a successful login.
    ///
    /// `{URI}/index.html?access_token=<token>`, with the token form-encoded.
    pub fn post_login_url(&self, access_token: &str) -> Url {
        let mut url = self.frontend_uri.clone();
        let path = format!("{}/index.html", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("access_token", access_token);
        url
    }
}
