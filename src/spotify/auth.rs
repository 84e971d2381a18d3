use reqwest::Url;

use crate::{
    error::GatewayError,
    spotify::SpotifyClient,
    types::{Token, TokenResponse},
};

/// Permissions requested from the user on login.
pub const SCOPES: [&str; 4] = [
    "user-read-private",
    "user-read-email",
    "user-library-read",
    "user-top-read",
];

impl SpotifyClient {
    /// Builds the accounts-service URL the browser is sent to on `/login`.
    ///
    /// # Arguments
    ///
    /// * `scopes` - Permissions to request, sent space separated
    /// * `state` - Opaque value Spotify echoes back on the redirect
    ///
    /// # Example
    ///
    /// ```
    /// let url = client.authorize_url(&SCOPES, "q8R2...");
    /// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
    /// ```
    pub fn authorize_url(&self, scopes: &[&str], state: &str) -> Url {
        let mut url = self.endpoints.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.credentials.redirect_uri)
            .append_pair("scope", &scopes.join(" "))
            .append_pair("state", state);
        url
    }

    /// Requests an app-level token with the client-credentials grant.
    ///
    /// The token carries no user context; it is what the background
    /// refresher keeps current.
    pub async fn client_credentials_grant(&self) -> Result<Token, GatewayError> {
        self.request_token(&[("grant_type", "client_credentials")])
            .await
    }

    /// Exchanges the one-time code from the login redirect for a user token.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code received on `/spotify-redirect`
    ///
    /// # Returns
    ///
    /// - `Ok(Token)` - Access token, refresh token, scope and expiry
    /// - `Err(GatewayError::UpstreamAuth)` - The code was rejected or the
    ///   accounts service could not be reached
    ///
    /// # Security Note
    ///
    /// Codes are single use and expire after a few minutes, so the exchange
    /// happens directly in the redirect handler and is never retried.
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<Token, GatewayError> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
        ])
        .await
    }

    /// Obtains a fresh access token from a refresh token.
    ///
    /// Spotify may rotate the refresh token. When the response carries none,
    /// the one passed in stays valid and is kept on the returned token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<Token, GatewayError> {
        let mut token = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }

        Ok(token)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<Token, GatewayError> {
        let response = self
            .http
            .post(&self.endpoints.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(form)
            .send()
            .await
            .map_err(GatewayError::UpstreamAuth)?
            .error_for_status()
            .map_err(GatewayError::UpstreamAuth)?;

        let body = response
            .json::<TokenResponse>()
            .await
            .map_err(GatewayError::UpstreamAuth)?;

        Ok(Token::from(body))
    }
}
