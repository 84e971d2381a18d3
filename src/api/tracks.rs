use axum::{Json, extract::Query};
use serde::Deserialize;

use crate::{
    error::GatewayError,
    spotify::{UserSession, profile::TopItemsQuery},
    types::{TopTracksView, TrackView},
    utils::{self, DEFAULT_TIME_RANGE},
};

#[derive(Debug, Deserialize)]
pub struct TopTracksParams {
    time_range: Option<String>,
    /// Kept as text so a malformed value falls back to the default instead
    /// of rejecting the request.
    limit: Option<String>,
}

pub async fn my_top_tracks(
    session: UserSession,
    Query(params): Query<TopTracksParams>,
) -> Result<Json<TopTracksView>, GatewayError> {
    let time_range =
        utils::non_empty(params.time_range).unwrap_or_else(|| DEFAULT_TIME_RANGE.to_string());
    let limit = utils::parse_limit(params.limit.as_deref());

    let query = TopItemsQuery {
        time_range: Some(time_range.clone()),
        limit: Some(limit),
    };
    let tracks = session.top_tracks(&query).await?;

    Ok(Json(TopTracksView {
        success: true,
        time_range,
        limit,
        tracks: tracks.into_iter().map(TrackView::from).collect(),
    }))
}
