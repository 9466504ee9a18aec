use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Token endpoint returned status {status_code}: {message}")]
    TokenEndpoint { status_code: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] bridge_traits::BridgeError),
}

pub type Result<T> = std::result::Result<T, AuthError>;
