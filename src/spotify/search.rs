use crate::{
    error::GatewayError,
    spotify::UserSession,
    types::{Artist, SearchResponse, Track},
};

impl UserSession {
    /// Searches the catalog for artists matching `query`.
    pub async fn search_artists(&self, query: &str) -> Result<Vec<Artist>, GatewayError> {
        let res = self.search(query, "artist").await?;
        Ok(res.artists.map(|page| page.items).unwrap_or_default())
    }

    /// Searches the catalog for tracks matching `query`.
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, GatewayError> {
        let res = self.search(query, "track").await?;
        Ok(res.tracks.map(|page| page.items).unwrap_or_default())
    }

    async fn search(&self, query: &str, kind: &str) -> Result<SearchResponse, GatewayError> {
        self.get_json(
            "/search",
            &[("q", query.to_string()), ("type", kind.to_string())],
        )
        .await
    }
}
