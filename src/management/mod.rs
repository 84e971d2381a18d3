mod auth;
mod refresh;
mod state;

pub use auth::CredentialStore;
pub use refresh::ClientTokenSource;
pub use refresh::TokenRefresher;
pub use refresh::refresh_client_token;
pub use state::MAX_PENDING_STATES;
pub use state::STATE_TTL_MINUTES;
pub use state::StateManager;
