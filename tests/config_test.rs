use std::{collections::HashMap, path::PathBuf, time::Duration};

use sporlgate::{config::*, error::SetupError};

fn base_vars() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("SPOTIFY_CLIENT_ID", "client-id"),
        ("SPOTIFY_CLIENT_SECRET", "client-secret"),
        ("REDIRECT_URI", "https://localhost:3000/spotify-redirect"),
        ("URI", "https://localhost:3000"),
        ("PFX_PATH", "certs/server.pfx"),
        ("PFX_PASSPHRASE", "secret"),
    ])
}

fn load(vars: &HashMap<&'static str, &'static str>) -> Result<Config, SetupError> {
    Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
}

#[test]
fn test_defaults() {
    let config = load(&base_vars()).unwrap();

    assert_eq!(config.credentials.client_id, "client-id");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.static_dir, PathBuf::from("public"));
    assert_eq!(config.pfx_path, PathBuf::from("certs/server.pfx"));
    assert_eq!(config.endpoints.api_url, DEFAULT_SPOTIFY_API_URL);
    assert_eq!(config.endpoints.auth_url.as_str(), DEFAULT_SPOTIFY_AUTH_URL);
    assert_eq!(config.endpoints.token_url, DEFAULT_SPOTIFY_TOKEN_URL);
    assert_eq!(config.token_refresh_interval, Duration::from_secs(50 * 60));
}

#[test]
fn test_overrides() {
    let mut vars = base_vars();
    vars.insert("PORT", "8443");
    vars.insert("STATIC_DIR", "dist");
    vars.insert("SPOTIFY_API_URL", "http://127.0.0.1:9000/v1/");
    vars.insert("TOKEN_REFRESH_INTERVAL_SECS", "60");

    let config = load(&vars).unwrap();
    assert_eq!(config.port, 8443);
    assert_eq!(config.static_dir, PathBuf::from("dist"));
    assert_eq!(config.endpoints.api_url, "http://127.0.0.1:9000/v1");
    assert_eq!(config.token_refresh_interval, Duration::from_secs(60));
}

#[test]
fn test_missing_required_var() {
    for name in [
        "SPOTIFY_CLIENT_ID",
        "SPOTIFY_CLIENT_SECRET",
        "REDIRECT_URI",
        "URI",
        "PFX_PATH",
        "PFX_PASSPHRASE",
    ] {
        let mut vars = base_vars();
        vars.remove(name);

        match load(&vars) {
            Err(SetupError::MissingVar(missing)) => assert_eq!(missing, name),
            other => panic!("expected MissingVar({}), got {:?}", name, other),
        }
    }
}

#[test]
fn test_empty_passphrase_is_allowed() {
    let mut vars = base_vars();
    vars.insert("PFX_PASSPHRASE", "");

    let config = load(&vars).unwrap();
    assert_eq!(config.pfx_passphrase, "");
}

#[test]
fn test_invalid_values() {
    let mut vars = base_vars();
    vars.insert("PORT", "https");
    assert!(matches!(
        load(&vars),
        Err(SetupError::InvalidVar { name: "PORT", .. })
    ));

    let mut vars = base_vars();
    vars.insert("URI", "not a url");
    assert!(matches!(
        load(&vars),
        Err(SetupError::InvalidVar { name: "URI", .. })
    ));

    let mut vars = base_vars();
    vars.insert("TOKEN_REFRESH_INTERVAL_SECS", "0");
    assert!(matches!(
        load(&vars),
        Err(SetupError::InvalidVar {
            name: "TOKEN_REFRESH_INTERVAL_SECS",
            ..
        })
    ));
}

#[test]
fn test_post_login_url() {
    let config = load(&base_vars()).unwrap();
    let url = config.post_login_url("BQC+token/with=chars");

    assert_eq!(url.path(), "/index.html");
    let token = url
        .query_pairs()
        .find(|(k, _)| k == "access_token")
        .map(|(_, v)| v.into_owned());
    assert_eq!(token.as_deref(), Some("BQC+token/with=chars"));

    let mut vars = base_vars();
    vars.insert("URI", "https://example.com/app/");
    let config = load(&vars).unwrap();
    assert_eq!(
        config.post_login_url("abc").as_str(),
        "https://example.com/app/index.html?access_token=abc"
    );
}
