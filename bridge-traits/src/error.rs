use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Service not available: {0}")]
    NotAvailable(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Whether this error means the credentials for the run are no longer
    /// usable. No subsequent call can succeed, so callers should abort the
    /// whole run instead of moving on to the next unit of work.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BridgeError::Unauthorized(_))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
