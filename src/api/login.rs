use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::{
    api::{AppState, found},
    error::GatewayError,
    spotify::auth::SCOPES,
    success,
    types::{GrantKind, RefreshView},
    utils::non_empty,
};

pub async fn login(State(state): State<AppState>) -> Response {
    let oauth_state = state.states.issue().await;
    let url = state.spotify.authorize_url(&SCOPES, &oauth_state);
    found(url.as_str())
}

#[derive(Debug, Deserialize)]
pub struct RedirectParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Landing point of Spotify's authorization redirect.
///
/// Checks run in this order, each answering 400 on failure: Spotify reported
/// an error, `code` is missing, `state` is missing or was not issued by
/// `/login` (or already used, or expired), the code exchange failed.
pub async fn spotify_redirect(
    State(state): State<AppState>,
    Query(params): Query<RedirectParams>,
) -> Result<Response, GatewayError> {
    if let Some(reason) = non_empty(params.error) {
        return Err(GatewayError::AuthorizationDenied(reason));
    }

    let code = non_empty(params.code).ok_or(GatewayError::MissingParameter("code"))?;
    let oauth_state = non_empty(params.state).ok_or(GatewayError::InvalidState)?;
    if !state.states.consume(&oauth_state).await {
        return Err(GatewayError::InvalidState);
    }

    let token = state.spotify.exchange_authorization_code(&code).await?;
    let location = state.config.post_login_url(&token.access_token);
    state
        .credentials
        .replace(token, GrantKind::AuthorizationCode)
        .await;

    success!("User authorized with Spotify");
    Ok(found(location.as_str()))
}

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    refresh_token: Option<String>,
}

pub async fn refresh(
    State(state): State<AppState>,
    Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshView>, GatewayError> {
    let refresh_token =
        non_empty(params.refresh_token).ok_or(GatewayError::MissingParameter("refresh_token"))?;

    let token = state.spotify.refresh_access_token(&refresh_token).await?;
    let view = RefreshView {
        success: true,
        access_token: token.access_token.clone(),
        expires_in: token.expires_in,
    };
    state.credentials.replace(token, GrantKind::Refresh).await;

    Ok(Json(view))
}
