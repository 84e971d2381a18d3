use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::{api::AppState, error::GatewayError, spotify::UserSession, utils};

#[derive(Debug, Deserialize)]
struct AccessTokenQuery {
    access_token: Option<String>,
}

impl FromRequestParts<AppState> for UserSession {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let access_token = Query::<AccessTokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| utils::non_empty(q.access_token))
            .ok_or(GatewayError::MissingParameter("access_token"))?;

        Ok(state.spotify.session(access_token))
    }
}
