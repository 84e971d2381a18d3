use axum::Json;

use crate::{error::GatewayError, spotify::UserSession, types::ProfileView};

pub async fn profile(session: UserSession) -> Result<Json<ProfileView>, GatewayError> {
    Ok(Json(session.profile().await?))
}
