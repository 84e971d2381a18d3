use chrono::Utc;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::utils::first_image_url;

/// Seconds before the reported expiry at which a token counts as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyEndpoints {
    pub api_url: String,
    pub auth_url: Url,
    pub token_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp().max(0) as u64;
        let expires_at = self.obtained_at.saturating_add(self.expires_in);
        now.saturating_add(EXPIRY_MARGIN_SECS) >= expires_at
    }
}

fn default_expires_in() -> u64 {
    3600
}

/// Body of a successful response from the accounts token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

impl From<TokenResponse> for Token {
    fn from(res: TokenResponse) -> Self {
        Token {
            access_token: res.access_token,
            refresh_token: res.refresh_token,
            scope: res.scope,
            expires_in: res.expires_in,
            obtained_at: Utc::now().timestamp().max(0) as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantKind {
    ClientCredentials,
    AuthorizationCode,
    Refresh,
}

/// The one live token of the process together with how it was obtained.
#[derive(Debug, Clone)]
pub struct TokenState {
    pub token: Token,
    pub grant: GrantKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub followers: Followers,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// `None` for local files.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    pub album: SimplifiedAlbum,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub explicit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub artists: Option<Paging<Artist>>,
    #[serde(default)]
    pub tracks: Option<Paging<Track>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistView {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: Option<u64>,
    pub image: Option<String>,
    pub spotify_url: Option<String>,
}

impl From<Artist> for ArtistView {
    fn from(artist: Artist) -> Self {
        ArtistView {
            image: first_image_url(&artist.images),
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            popularity: artist.popularity,
            followers: artist.followers.map(|f| f.total),
            spotify_url: artist.external_urls.spotify,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackArtistView {
    pub id: Option<String>,
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumView {
    pub name: String,
    pub image: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackView {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<TrackArtistView>,
    pub album: AlbumView,
    pub preview_url: Option<String>,
    pub spotify_url: Option<String>,
    pub duration_ms: u64,
    pub popularity: Option<u32>,
    pub explicit: bool,
}

impl From<Track> for TrackView {
    fn from(track: Track) -> Self {
        TrackView {
            id: track.id,
            name: track.name,
            artists: track
                .artists
                .into_iter()
                .map(|a| TrackArtistView {
                    id: a.id,
                    name: a.name,
                    url: a.external_urls.spotify,
                })
                .collect(),
            album: AlbumView {
                image: first_image_url(&track.album.images),
                name: track.album.name,
                url: track.album.external_urls.spotify,
            },
            preview_url: track.preview_url,
            spotify_url: track.external_urls.spotify,
            duration_ms: track.duration_ms,
            popularity: track.popularity,
            explicit: track.explicit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub name: Option<String>,
    pub email: Option<String>,
    pub followers: u64,
    pub image: Option<String>,
    #[serde(rename = "topArtists")]
    pub top_artists: Vec<ArtistView>,
    #[serde(rename = "topTracks")]
    pub top_tracks: Vec<TrackView>,
}

impl ProfileView {
    pub fn new(profile: UserProfile, top_artists: Vec<Artist>, top_tracks: Vec<Track>) -> Self {
        ProfileView {
            image: first_image_url(&profile.images),
            name: profile.display_name,
            email: profile.email,
            followers: profile.followers.total,
            top_artists: top_artists.into_iter().map(ArtistView::from).collect(),
            top_tracks: top_tracks.into_iter().map(TrackView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopTracksView {
    pub success: bool,
    pub time_range: String,
    pub limit: u32,
    pub tracks: Vec<TrackView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshView {
    pub success: bool,
    pub access_token: String,
    pub expires_in: u64,
}
