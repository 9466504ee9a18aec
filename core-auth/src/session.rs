//! Authenticated Session
//!
//! One `Session` is established per run, before any catalog or playlist
//! call, and then handed to the connectors. Two ways to get one:
//!
//! - [`Session::client_credentials`] performs the OAuth 2.0
//!   client-credentials exchange (RFC 6749 §4.4). Sufficient for catalog
//!   search, which needs no user context.
//! - [`Session::with_user_token`] wraps a user-authorized token obtained
//!   out-of-band. Required for playlist modification, which needs
//!   user-scoped grants.

use std::sync::Arc;
use std::time::Duration;

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{AuthError, Result};
use crate::types::{AccessToken, Credentials};

/// Token endpoint for the destination service.
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Token endpoint response body (RFC 6749 §5.1).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
    expires_in: i64,
}

/// An authenticated session against the destination service.
#[derive(Debug, Clone)]
pub struct Session {
    token: AccessToken,
    user_id: String,
}

impl Session {
    /// Wrap a user-authorized bearer token obtained outside this library.
    pub fn with_user_token(token: AccessToken, user_id: impl Into<String>) -> Self {
        Self {
            token,
            user_id: user_id.into(),
        }
    }

    /// Perform the client-credentials exchange and return a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AuthenticationFailed`] when the token endpoint
    /// rejects the credentials (HTTP 400/401), [`AuthError::TokenEndpoint`]
    /// for other non-2xx statuses, and [`AuthError::Transport`] for network
    /// failures.
    #[instrument(skip(http, credentials))]
    pub async fn client_credentials(
        http: Arc<dyn HttpClient>,
        credentials: &Credentials,
    ) -> Result<Self> {
        let form = serde_urlencoded::to_string([("grant_type", "client_credentials")])
            .map_err(|e| AuthError::AuthenticationFailed(format!("Invalid form body: {}", e)))?;

        let basic = BASE64.encode(format!(
            "{}:{}",
            credentials.client_id, credentials.client_secret
        ));

        let request = HttpRequest::new(HttpMethod::Post, TOKEN_URL)
            .header("Authorization", format!("Basic {}", basic))
            .form_body(form)
            .timeout(Duration::from_secs(15));

        let response = http.execute(request).await?;

        if response.status == 400 || response.status == 401 {
            return Err(AuthError::AuthenticationFailed(
                response.text().unwrap_or_default(),
            ));
        }

        if !response.is_success() {
            return Err(AuthError::TokenEndpoint {
                status_code: response.status,
                message: response.text().unwrap_or_default(),
            });
        }

        let token_response: TokenResponse = response
            .json()
            .map_err(|e| AuthError::AuthenticationFailed(format!("Malformed token response: {}", e)))?;

        debug!(expires_in = token_response.expires_in, "Obtained access token");

        Ok(Self {
            token: AccessToken::new(token_response.access_token, token_response.expires_in),
            user_id: credentials.user_id.clone(),
        })
    }

    /// The bearer token for API calls.
    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// The user whose playlists this session writes.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
