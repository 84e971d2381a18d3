use crate::{
    error::GatewayError,
    spotify::UserSession,
    types::{Artist, Paging, ProfileView, Track, UserProfile},
};

/// Optional knobs of the `/me/top/{type}` endpoints.
#[derive(Debug, Clone, Default)]
pub struct TopItemsQuery {
    pub time_range: Option<String>,
    pub limit: Option<u32>,
}

impl TopItemsQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(time_range) = &self.time_range {
            params.push(("time_range", time_range.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

impl UserSession {
    /// `GET /me`
    pub async fn me(&self) -> Result<UserProfile, GatewayError> {
        self.get_json("/me", &[]).await
    }

    /// `GET /me/top/artists`
    pub async fn top_artists(&self, query: &TopItemsQuery) -> Result<Vec<Artist>, GatewayError> {
        let page: Paging<Artist> = self.get_json("/me/top/artists", &query.to_params()).await?;
        Ok(page.items)
    }

    /// `GET /me/top/tracks`
    pub async fn top_tracks(&self, query: &TopItemsQuery) -> Result<Vec<Track>, GatewayError> {
        let page: Paging<Track> = self.get_json("/me/top/tracks", &query.to_params()).await?;
        Ok(page.items)
    }

    /// Profile plus top artists and top tracks.
    ///
    /// The three calls run one after another with Spotify's defaults; the
    /// first failure aborts the rest.
    pub async fn profile(&self) -> Result<ProfileView, GatewayError> {
        let defaults = TopItemsQuery::default();

        let me = self.me().await?;
        let top_artists = self.top_artists(&defaults).await?;
        let top_tracks = self.top_tracks(&defaults).await?;

        Ok(ProfileView::new(me, top_artists, top_tracks))
    }
}
