use axum::{Json, extract::Query};
use serde::Deserialize;

use crate::{
    error::GatewayError,
    spotify::UserSession,
    types::{ArtistView, TrackView},
    utils::non_empty,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

impl SearchParams {
    fn query(self) -> Result<String, GatewayError> {
        non_empty(self.q).ok_or(GatewayError::MissingParameter("q"))
    }
}

pub async fn search_artists(
    session: UserSession,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ArtistView>>, GatewayError> {
    let artists = session.search_artists(&params.query()?).await?;
    Ok(Json(artists.into_iter().map(ArtistView::from).collect()))
}

pub async fn search_songs(
    session: UserSession,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TrackView>>, GatewayError> {
    let tracks = session.search_tracks(&params.query()?).await?;
    Ok(Json(tracks.into_iter().map(TrackView::from).collect()))
}
