use chrono::Utc;
use serde_json::json;
use sporlgate::types::*;

fn sample_track() -> Track {
    serde_json::from_value(json!({
        "id": "track_1",
        "name": "Heartbeats",
        "artists": [
            {
                "id": "artist_1",
                "name": "The Knife",
                "external_urls": { "spotify": "https://open.spotify.com/artist/artist_1" }
            },
            { "id": "artist_2", "name": "José González" }
        ],
        "album": {
            "name": "Deep Cuts",
            "images": [
                { "url": "https://i.scdn.co/album_large", "height": 640, "width": 640 },
                { "url": "https://i.scdn.co/album_small", "height": 64, "width": 64 }
            ],
            "external_urls": { "spotify": "https://open.spotify.com/album/album_1" }
        },
        "preview_url": null,
        "external_urls": { "spotify": "https://open.spotify.com/track/track_1" },
        "duration_ms": 231000,
        "popularity": 61,
        "explicit": false
    }))
    .unwrap()
}

#[test]
fn test_track_view_flattens_track() {
    let view = TrackView::from(sample_track());

    assert_eq!(view.id.as_deref(), Some("track_1"));
    assert_eq!(view.name, "Heartbeats");
    assert_eq!(view.artists.len(), 2);
    assert_eq!(
        view.artists[0].url.as_deref(),
        Some("https://open.spotify.com/artist/artist_1")
    );
    assert_eq!(view.artists[1].url, None);
    assert_eq!(view.album.name, "Deep Cuts");
    assert_eq!(view.album.image.as_deref(), Some("https://i.scdn.co/album_large"));
    assert_eq!(
        view.album.url.as_deref(),
        Some("https://open.spotify.com/album/album_1")
    );
    assert_eq!(view.preview_url, None);
    assert_eq!(
        view.spotify_url.as_deref(),
        Some("https://open.spotify.com/track/track_1")
    );
    assert_eq!(view.duration_ms, 231000);
    assert_eq!(view.popularity, Some(61));
    assert!(!view.explicit);
}

#[test]
fn test_track_view_serialized_shape() {
    let value = serde_json::to_value(TrackView::from(sample_track())).unwrap();

    assert_eq!(value["album"]["image"], "https://i.scdn.co/album_large");
    assert_eq!(value["artists"][0]["name"], "The Knife");
    assert!(value["preview_url"].is_null());
    assert!(value.get("external_urls").is_none());
}

#[test]
fn test_local_track_without_album_images() {
    let track: Track = serde_json::from_value(json!({
        "id": null,
        "name": "Local Demo",
        "artists": [],
        "album": { "name": "" }
    }))
    .unwrap();

    let view = TrackView::from(track);
    assert_eq!(view.id, None);
    assert_eq!(view.album.image, None);
    assert_eq!(view.duration_ms, 0);
    assert!(view.artists.is_empty());
}

#[test]
fn test_artist_view() {
    let artist: Artist = serde_json::from_value(json!({
        "id": "artist_1",
        "name": "Robyn",
        "genres": ["dance pop", "electropop"],
        "popularity": 70,
        "followers": { "href": null, "total": 2500000 },
        "images": [{ "url": "https://i.scdn.co/robyn" }],
        "external_urls": { "spotify": "https://open.spotify.com/artist/artist_1" }
    }))
    .unwrap();

    let view = ArtistView::from(artist);
    assert_eq!(view.name, "Robyn");
    assert_eq!(view.genres, vec!["dance pop", "electropop"]);
    assert_eq!(view.followers, Some(2500000));
    assert_eq!(view.image.as_deref(), Some("https://i.scdn.co/robyn"));
}

#[test]
fn test_profile_view_uses_camel_case_lists() {
    let profile: UserProfile = serde_json::from_value(json!({
        "id": "user_1",
        "display_name": "Listener",
        "email": "listener@example.com",
        "followers": { "total": 12 },
        "images": []
    }))
    .unwrap();

    let view = ProfileView::new(profile, Vec::new(), vec![sample_track()]);
    let value = serde_json::to_value(&view).unwrap();

    assert_eq!(value["name"], "Listener");
    assert_eq!(value["followers"], 12);
    assert!(value["image"].is_null());
    assert_eq!(value["topArtists"], json!([]));
    assert_eq!(value["topTracks"][0]["name"], "Heartbeats");
}

#[test]
fn test_token_response_defaults() {
    let res: TokenResponse = serde_json::from_value(json!({
        "access_token": "abc",
        "token_type": "Bearer"
    }))
    .unwrap();

    let token = Token::from(res);
    assert_eq!(token.access_token, "abc");
    assert_eq!(token.refresh_token, None);
    assert_eq!(token.expires_in, 3600);
    assert!(!token.is_expired());
}

#[test]
fn test_token_expiry_margin() {
    let now = Utc::now().timestamp() as u64;
    let token = Token {
        access_token: "abc".to_string(),
        refresh_token: None,
        scope: None,
        expires_in: 3600,
        obtained_at: now - 3500,
    };

    // Less than the 240 second margin remaining
    assert!(token.is_expired());
}

#[test]
fn test_token_with_huge_lifetime_does_not_overflow() {
    let res: TokenResponse = serde_json::from_value(json!({
        "access_token": "abc",
        "expires_in": u64::MAX
    }))
    .unwrap();

    let token = Token::from(res);
    assert_eq!(token.expires_in, u64::MAX);
    assert!(!token.is_expired());
}
