use std::sync::Arc;

use tokio::sync::Mutex;

use crate::types::{GrantKind, Token, TokenState};

/// Holds the process-wide [`TokenState`].
///
/// At most one state is live. Every grant replaces it as a whole; nothing is
/// merged. Route handlers never read from here to call Spotify, they use the
/// caller's own token.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    state: Arc<Mutex<Option<TokenState>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn replace(&self, token: Token, grant: GrantKind) {
        let mut lock = self.state.lock().await;
        *lock = Some(TokenState { token, grant });
    }

    pub async fn snapshot(&self) -> Option<TokenState> {
        self.state.lock().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .as_ref()
            .map(|s| s.token.access_token.clone())
    }
}
