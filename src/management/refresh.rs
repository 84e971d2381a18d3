use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;

use crate::{
    error::GatewayError,
    management::CredentialStore,
    spotify::SpotifyClient,
    success,
    types::{GrantKind, Token},
    warning,
};

/// Anything that can hand out an app-level (client-credentials) token.
#[async_trait]
pub trait ClientTokenSource: Send + Sync + 'static {
    async fn request_client_token(&self) -> Result<Token, GatewayError>;
}

#[async_trait]
impl ClientTokenSource for SpotifyClient {
    async fn request_client_token(&self) -> Result<Token, GatewayError> {
        self.client_credentials_grant().await
    }
}

/// Performs one client-credentials grant and stores the result.
///
/// On failure the error is logged and the store keeps whatever it held
/// before. Returns whether the store was updated.
pub async fn refresh_client_token<S>(source: &S, store: &CredentialStore) -> bool
where
    S: ClientTokenSource + ?Sized,
{
    match source.request_client_token().await {
        Ok(token) => {
            store.replace(token, GrantKind::ClientCredentials).await;
            success!("Spotify client token refreshed");
            true
        }
        Err(e) => {
            warning!("Failed to refresh Spotify client token: {}", e);
            false
        }
    }
}

/// Background task keeping the app-level token current.
///
/// The first grant happens right after [`TokenRefresher::start`], then one
/// per `period`. There is no jitter and no backoff; a failed grant just waits
/// for the next tick. [`TokenRefresher::stop`] ends the task, abandoning a
/// grant that is still in flight.
#[derive(Debug)]
pub struct TokenRefresher {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl TokenRefresher {
    pub fn start<S>(source: Arc<S>, store: CredentialStore, period: Duration) -> Self
    where
        S: ClientTokenSource,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            _ = token.cancelled() => break,
                            _ = refresh_client_token(source.as_ref(), &store) => {}
                        }
                    }
                }
            }
        });

        TokenRefresher { cancel, handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancels the task and waits for it to finish.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            warning!("Token refresher ended abnormally: {}", e);
        }
    }
}
