use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::error::{AuthError, Result};

/// Application credentials for the destination service.
///
/// Resolved once per run, before any catalog or playlist call is made.
///
/// # Security
///
/// The client secret is never logged; the `Debug` implementation redacts it.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Destination-service user whose playlists are written
    pub user_id: String,
    /// Redirect URI, only needed when a user-authorization flow is run
    /// outside this library
    pub redirect_uri: Option<String>,
}

impl Credentials {
    /// Environment variable holding the client id.
    pub const ENV_CLIENT_ID: &'static str = "SPOTIFY_CLIENT_ID";
    /// Environment variable holding the client secret.
    pub const ENV_CLIENT_SECRET: &'static str = "SPOTIFY_CLIENT_SECRET";
    /// Environment variable holding the user id.
    pub const ENV_USER_ID: &'static str = "SPOTIFY_USER_ID";
    /// Environment variable holding the optional redirect URI.
    pub const ENV_REDIRECT_URI: &'static str = "SPOTIFY_REDIRECT_URI";

    /// Load credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredential`] naming the first required
    /// variable that is absent or empty.
    pub fn from_env() -> Result<Self> {
        fn required(name: &'static str) -> Result<String> {
            match std::env::var(name) {
                Ok(value) if !value.is_empty() => Ok(value),
                _ => Err(AuthError::MissingCredential(name)),
            }
        }

        Ok(Self {
            client_id: required(Self::ENV_CLIENT_ID)?,
            client_secret: required(Self::ENV_CLIENT_SECRET)?,
            user_id: required(Self::ENV_USER_ID)?,
            redirect_uri: std::env::var(Self::ENV_REDIRECT_URI)
                .ok()
                .filter(|v| !v.is_empty()),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// A bearer access token with its expiry time.
///
/// # Security
///
/// The token value is redacted in `Debug` output.
#[derive(Clone)]
pub struct AccessToken {
    secret: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a token expiring `expires_in` seconds from now.
    pub fn new(secret: impl Into<String>, expires_in: i64) -> Self {
        Self {
            secret: secret.into(),
            expires_at: Utc::now() + Duration::seconds(expires_in),
        }
    }

    /// The raw bearer token value.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// When the token expires (UTC).
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token has expired, with a one minute safety margin so a
    /// run does not start calls it cannot finish.
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(60) >= self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_expiry() {
        let fresh = AccessToken::new("abc", 3600);
        assert!(!fresh.is_expired());

        let stale = AccessToken::new("abc", 30); // inside the safety margin
        assert!(stale.is_expired());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials {
            client_id: "id".into(),
            client_secret: "very-secret".into(),
            user_id: "user".into(),
            redirect_uri: None,
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("[REDACTED]"));

        let token = AccessToken::new("tok-123", 3600);
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("tok-123"));
    }

    #[test]
    fn test_from_env_missing_variable() {
        // A name that is certainly not set in the test environment
        std::env::remove_var(Credentials::ENV_CLIENT_ID);
        let result = Credentials::from_env();
        assert!(matches!(
            result,
            Err(AuthError::MissingCredential(Credentials::ENV_CLIENT_ID))
        ));
    }
}
