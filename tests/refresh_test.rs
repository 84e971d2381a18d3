use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use sporlgate::{
    error::GatewayError,
    management::{ClientTokenSource, CredentialStore, TokenRefresher, refresh_client_token},
    types::{GrantKind, Token},
};

const PERIOD: Duration = Duration::from_secs(50 * 60);

struct CountingSource {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingSource {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientTokenSource for CountingSource {
    async fn request_client_token(&self) -> Result<Token, GatewayError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(GatewayError::InvalidState);
        }

        Ok(token(&format!("client-token-{}", n)))
    }
}

fn token(access_token: &str) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: None,
        scope: None,
        expires_in: 3600,
        obtained_at: 0,
    }
}

#[tokio::test(start_paused = true)]
async fn test_grants_on_start_and_once_per_period() {
    let source = CountingSource::new(false);
    let store = CredentialStore::new();
    let refresher = TokenRefresher::start(Arc::clone(&source), store.clone(), PERIOD);

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(source.calls(), 1);
    assert_eq!(store.access_token().await.as_deref(), Some("client-token-1"));

    // Just before the period elapses nothing new happens
    tokio::time::sleep(PERIOD - Duration::from_millis(20)).await;
    assert_eq!(source.calls(), 1);

    // Crossing the boundary issues exactly one new grant
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(source.calls(), 2);
    assert_eq!(store.access_token().await.as_deref(), Some("client-token-2"));

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.grant, GrantKind::ClientCredentials);

    refresher.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_future_grants() {
    let source = CountingSource::new(false);
    let store = CredentialStore::new();
    let refresher = TokenRefresher::start(Arc::clone(&source), store.clone(), PERIOD);

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(refresher.is_running());
    refresher.stop().await;

    tokio::time::sleep(PERIOD * 3).await;
    assert_eq!(source.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_grant_keeps_previous_token() {
    let source = CountingSource::new(true);
    let store = CredentialStore::new();
    store
        .replace(token("user-token"), GrantKind::AuthorizationCode)
        .await;

    let refresher = TokenRefresher::start(Arc::clone(&source), store.clone(), PERIOD);

    tokio::time::sleep(PERIOD + Duration::from_millis(10)).await;
    assert_eq!(source.calls(), 2);

    let state = store.snapshot().await.unwrap();
    assert_eq!(state.token.access_token, "user-token");
    assert_eq!(state.grant, GrantKind::AuthorizationCode);

    refresher.stop().await;
}

#[tokio::test]
async fn test_refresh_client_token_replaces_state() {
    let store = CredentialStore::new();
    store.replace(token("old"), GrantKind::Refresh).await;

    assert!(refresh_client_token(CountingSource::new(false).as_ref(), &store).await);
    let state = store.snapshot().await.unwrap();
    assert_eq!(state.token.access_token, "client-token-1");
    assert_eq!(state.grant, GrantKind::ClientCredentials);

    assert!(!refresh_client_token(CountingSource::new(true).as_ref(), &store).await);
    assert_eq!(store.access_token().await.as_deref(), Some("client-token-1"));
}

struct HangingSource;

#[async_trait]
impl ClientTokenSource for HangingSource {
    async fn request_client_token(&self) -> Result<Token, GatewayError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn test_stop_abandons_grant_in_flight() {
    let store = CredentialStore::new();
    let refresher = TokenRefresher::start(Arc::new(HangingSource), store.clone(), PERIOD);

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(refresher.is_running());

    tokio::time::timeout(Duration::from_secs(1), refresher.stop())
        .await
        .expect("stop should not wait for the hung grant");
    assert!(store.snapshot().await.is_none());
}
