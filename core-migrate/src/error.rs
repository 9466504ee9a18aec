//! Error types for the migration engine

use bridge_traits::BridgeError;
use thiserror::Error;

use crate::pipeline::MigrationReport;

/// Migration errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Credentials are no longer usable; aborts the whole run
    #[error("Credentials expired: {0}")]
    CredentialsExpired(String),

    /// The run stopped at a fatal error. Results for the playlists that
    /// finished before the abort travel with the error, so partial
    /// completion stays visible to the caller.
    #[error("Run aborted after {} completed playlist(s): {cause}", .completed.playlists.len())]
    RunAborted {
        completed: MigrationReport,
        cause: String,
    },

    /// A provider call failed; fatal for the current playlist only
    #[error("Transport error: {0}")]
    Transport(BridgeError),

    /// A batched upload failed part-way through. Earlier batches are already
    /// applied on the provider; a re-run skips them and resumes cleanly.
    #[error(
        "Upload to '{playlist}' interrupted after {batches_applied} batch(es), \
         {tracks_added} track(s) applied: {source}"
    )]
    UploadInterrupted {
        playlist: String,
        batches_applied: usize,
        tracks_added: usize,
        source: BridgeError,
    },
}

impl MigrateError {
    /// Whether this error must abort the whole run rather than just the
    /// playlist being processed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MigrateError::CredentialsExpired(_) | MigrateError::RunAborted { .. }
        )
    }
}

impl From<BridgeError> for MigrateError {
    fn from(error: BridgeError) -> Self {
        if error.is_unauthorized() {
            MigrateError::CredentialsExpired(error.to_string())
        } else {
            MigrateError::Transport(error)
        }
    }
}

/// Result type for migration operations
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_converts_to_fatal() {
        let error: MigrateError = BridgeError::Unauthorized("token expired".into()).into();
        assert!(error.is_fatal());

        let error: MigrateError = BridgeError::OperationFailed("timeout".into()).into();
        assert!(!error.is_fatal());
    }

    #[test]
    fn test_run_aborted_is_fatal_and_counts_completed() {
        let error = MigrateError::RunAborted {
            completed: MigrationReport { playlists: vec![] },
            cause: "Credentials expired: token expired".to_string(),
        };
        assert!(error.is_fatal());
        assert!(error.to_string().contains("0 completed playlist(s)"));
    }

    #[test]
    fn test_upload_interrupted_display() {
        let error = MigrateError::UploadInterrupted {
            playlist: "Warm mornings".to_string(),
            batches_applied: 2,
            tracks_added: 198,
            source: BridgeError::OperationFailed("503".into()),
        };
        let message = error.to_string();
        assert!(message.contains("Warm mornings"));
        assert!(message.contains("2 batch(es)"));
        assert!(message.contains("198 track(s)"));
    }
}
