//! # Playlist Reconciler
//!
//! Brings one destination playlist in line with a resolved candidate list.
//!
//! ## Overview
//!
//! Reconciliation is a fixed sequence: look the playlist up by exact name,
//! create it when missing, fetch its current membership, diff the candidates
//! against it (order-preserving, duplicates collapsed), and upload the
//! remainder in batches below the provider's add limit. Every step reads the
//! provider's current state, so re-running after any interruption converges
//! without double-adding anything.

use bridge_traits::playlist::PlaylistService;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::{MigrateError, Result};

/// What reconciliation did to one playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    /// Provider-assigned playlist id
    pub playlist_id: String,

    /// Whether the playlist had to be created
    pub created: bool,

    /// Track ids uploaded in this run
    pub added: usize,

    /// Candidate ids skipped because the playlist already carried them
    pub skipped_existing: usize,

    /// Candidate ids collapsed because an earlier candidate repeated them
    pub duplicates_collapsed: usize,
}

/// Reconciles destination playlists against candidate track lists.
pub struct PlaylistReconciler {
    /// Playlist operations on the destination service
    playlists: Arc<dyn PlaylistService>,

    /// Maximum ids per add call, strictly below the provider limit
    batch_limit: usize,

    /// Visibility for playlists that have to be created
    playlist_public: bool,

    /// Description for playlists that have to be created
    playlist_description: String,
}

impl PlaylistReconciler {
    /// Create a new reconciler.
    pub fn new(
        playlists: Arc<dyn PlaylistService>,
        batch_limit: usize,
        playlist_public: bool,
        playlist_description: impl Into<String>,
    ) -> Self {
        Self {
            playlists,
            batch_limit,
            playlist_public,
            playlist_description: playlist_description.into(),
        }
    }

    /// Reconcile the named playlist so it contains every candidate id.
    ///
    /// `candidate_ids` is the desired content in playback order. Ids already
    /// present on the provider are skipped; the rest are appended in order.
    ///
    /// # Errors
    ///
    /// [`MigrateError::UploadInterrupted`] reports a failure part-way through
    /// the batched upload, including how much was already applied. Expired
    /// credentials surface as [`MigrateError::CredentialsExpired`] instead.
    #[instrument(skip(self, candidate_ids), fields(name = %name, candidates = candidate_ids.len()))]
    pub async fn reconcile(&self, name: &str, candidate_ids: &[String]) -> Result<ReconcileOutcome> {
        let existing = self.playlists.list_playlists().await?;

        let (playlist_id, created) = match existing.into_iter().find(|p| p.name == name) {
            Some(playlist) => {
                debug!(playlist_id = %playlist.id, "Playlist already exists");
                (playlist.id, false)
            }
            None => {
                let id = self
                    .playlists
                    .create_playlist(name, self.playlist_public, &self.playlist_description)
                    .await?;
                info!(playlist_id = %id, "Created destination playlist");
                (id, true)
            }
        };

        // A just-created playlist is empty; skip the membership fetch.
        let current = if created {
            HashSet::new()
        } else {
            self.playlists.playlist_track_ids(&playlist_id).await?
        };

        let additions = pending_additions(&current, candidate_ids);

        let mut tracks_added = 0;
        let mut batches_applied = 0;
        for chunk in additions.pending.chunks(self.batch_limit) {
            if let Err(error) = self.playlists.add_tracks(&playlist_id, chunk).await {
                if error.is_unauthorized() {
                    return Err(MigrateError::CredentialsExpired(error.to_string()));
                }
                return Err(MigrateError::UploadInterrupted {
                    playlist: name.to_string(),
                    batches_applied,
                    tracks_added,
                    source: error,
                });
            }
            batches_applied += 1;
            tracks_added += chunk.len();
            debug!(batch = batches_applied, size = chunk.len(), "Uploaded batch");
        }

        info!(
            added = tracks_added,
            skipped_existing = additions.already_present,
            duplicates = additions.duplicates,
            created,
            "Playlist reconciled"
        );

        Ok(ReconcileOutcome {
            playlist_id,
            created,
            added: tracks_added,
            skipped_existing: additions.already_present,
            duplicates_collapsed: additions.duplicates,
        })
    }
}

/// The diff between a candidate list and current playlist membership.
struct Additions {
    /// Ids to upload, in candidate order, each at most once
    pending: Vec<String>,
    /// Candidates dropped because the playlist already carries the id
    already_present: usize,
    /// Candidates dropped because an earlier candidate repeated the id
    duplicates: usize,
}

fn pending_additions(current: &HashSet<String>, candidate_ids: &[String]) -> Additions {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut pending = Vec::new();
    let mut already_present = 0;
    let mut duplicates = 0;

    for id in candidate_ids {
        if current.contains(id) {
            already_present += 1;
        } else if !seen.insert(id.as_str()) {
            duplicates += 1;
        } else {
            pending.push(id.clone());
        }
    }

    Additions {
        pending,
        already_present,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::playlist::RemotePlaylist;
    use bridge_traits::BridgeError;
    use mockall::mock;

    mock! {
        Playlists {}

        #[async_trait]
        impl PlaylistService for Playlists {
            async fn list_playlists(&self) -> bridge_traits::error::Result<Vec<RemotePlaylist>>;
            async fn create_playlist(
                &self,
                name: &str,
                public: bool,
                description: &str,
            ) -> bridge_traits::error::Result<String>;
            async fn playlist_track_ids(
                &self,
                playlist_id: &str,
            ) -> bridge_traits::error::Result<HashSet<String>>;
            async fn add_tracks(
                &self,
                playlist_id: &str,
                track_ids: &[String],
            ) -> bridge_traits::error::Result<()>;
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn reconciler(playlists: MockPlaylists) -> PlaylistReconciler {
        PlaylistReconciler::new(Arc::new(playlists), 99, false, "Imported")
    }

    #[test]
    fn test_pending_additions_diff() {
        let current: HashSet<String> = ids(&["A", "B"]).into_iter().collect();
        let candidates = ids(&["A", "B", "C", "C", "D"]);

        let additions = pending_additions(&current, &candidates);
        assert_eq!(additions.pending, ids(&["C", "D"]));
        assert_eq!(additions.already_present, 2);
        assert_eq!(additions.duplicates, 1);

        let full: HashSet<String> = ids(&["A", "B", "C", "D"]).into_iter().collect();
        let additions = pending_additions(&full, &candidates);
        assert!(additions.pending.is_empty());
        assert_eq!(additions.already_present, 5);
        assert_eq!(additions.duplicates, 0);
    }

    #[tokio::test]
    async fn test_creates_missing_playlist_and_uploads() {
        let mut playlists = MockPlaylists::new();
        playlists
            .expect_list_playlists()
            .times(1)
            .returning(|| Ok(vec![]));
        playlists
            .expect_create_playlist()
            .withf(|name, public, description| {
                name == "Warm mornings" && !public && description == "Imported"
            })
            .times(1)
            .returning(|_, _, _| Ok("pl-new".to_string()));
        // No membership fetch for a playlist we just created.
        playlists.expect_playlist_track_ids().times(0);
        playlists
            .expect_add_tracks()
            .withf(|id, tracks| id == "pl-new" && tracks == ids(&["a", "b"]))
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = reconciler(playlists)
            .reconcile("Warm mornings", &ids(&["a", "b"]))
            .await
            .unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.skipped_existing, 0);
        assert_eq!(outcome.duplicates_collapsed, 0);
    }

    #[tokio::test]
    async fn test_second_run_adds_nothing() {
        let mut playlists = MockPlaylists::new();
        playlists.expect_list_playlists().times(1).returning(|| {
            Ok(vec![RemotePlaylist {
                id: "pl1".to_string(),
                name: "Warm mornings".to_string(),
            }])
        });
        playlists
            .expect_playlist_track_ids()
            .times(1)
            .returning(|_| Ok(ids(&["a", "b"]).into_iter().collect()));
        playlists.expect_add_tracks().times(0);

        let outcome = reconciler(playlists)
            .reconcile("Warm mornings", &ids(&["a", "b"]))
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.added, 0);
        assert_eq!(outcome.skipped_existing, 2);
        assert_eq!(outcome.duplicates_collapsed, 0);
    }

    #[tokio::test]
    async fn test_duplicates_counted_apart_from_existing() {
        let mut playlists = MockPlaylists::new();
        playlists.expect_list_playlists().times(1).returning(|| {
            Ok(vec![RemotePlaylist {
                id: "pl1".to_string(),
                name: "Mix".to_string(),
            }])
        });
        playlists
            .expect_playlist_track_ids()
            .times(1)
            .returning(|_| Ok(ids(&["a"]).into_iter().collect()));
        playlists
            .expect_add_tracks()
            .withf(|_, tracks| tracks == ids(&["b", "c"]))
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = reconciler(playlists)
            .reconcile("Mix", &ids(&["a", "b", "b", "c"]))
            .await
            .unwrap();

        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.skipped_existing, 1);
        assert_eq!(outcome.duplicates_collapsed, 1);
    }

    #[tokio::test]
    async fn test_batches_respect_limit() {
        let candidates: Vec<String> = (0..250).map(|i| format!("t{}", i)).collect();

        let mut playlists = MockPlaylists::new();
        playlists.expect_list_playlists().times(1).returning(|| {
            Ok(vec![RemotePlaylist {
                id: "pl1".to_string(),
                name: "Big".to_string(),
            }])
        });
        playlists
            .expect_playlist_track_ids()
            .times(1)
            .returning(|_| Ok(HashSet::new()));

        let mut expected = vec![52usize, 99, 99];
        playlists
            .expect_add_tracks()
            .times(3)
            .returning(move |_, tracks| {
                assert_eq!(tracks.len(), expected.pop().unwrap());
                Ok(())
            });

        let outcome = reconciler(playlists)
            .reconcile("Big", &candidates)
            .await
            .unwrap();

        assert_eq!(outcome.added, 250);
    }

    #[tokio::test]
    async fn test_upload_interruption_reports_progress() {
        let candidates: Vec<String> = (0..150).map(|i| format!("t{}", i)).collect();

        let mut playlists = MockPlaylists::new();
        playlists.expect_list_playlists().times(1).returning(|| {
            Ok(vec![RemotePlaylist {
                id: "pl1".to_string(),
                name: "Flaky".to_string(),
            }])
        });
        playlists
            .expect_playlist_track_ids()
            .times(1)
            .returning(|_| Ok(HashSet::new()));

        let mut calls = 0;
        playlists
            .expect_add_tracks()
            .times(2)
            .returning(move |_, _| {
                calls += 1;
                if calls == 1 {
                    Ok(())
                } else {
                    Err(BridgeError::OperationFailed("503".into()))
                }
            });

        let error = reconciler(playlists)
            .reconcile("Flaky", &candidates)
            .await
            .unwrap_err();

        match error {
            MigrateError::UploadInterrupted {
                playlist,
                batches_applied,
                tracks_added,
                ..
            } => {
                assert_eq!(playlist, "Flaky");
                assert_eq!(batches_applied, 1);
                assert_eq!(tracks_added, 99);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_expired_credentials_abort_instead_of_interrupting() {
        let mut playlists = MockPlaylists::new();
        playlists
            .expect_list_playlists()
            .times(1)
            .returning(|| Err(BridgeError::Unauthorized("token expired".into())));

        let error = reconciler(playlists)
            .reconcile("Any", &ids(&["a"]))
            .await
            .unwrap_err();

        assert!(error.is_fatal());
    }

    #[tokio::test]
    async fn test_empty_candidates_still_create_playlist() {
        let mut playlists = MockPlaylists::new();
        playlists
            .expect_list_playlists()
            .times(1)
            .returning(|| Ok(vec![]));
        playlists
            .expect_create_playlist()
            .times(1)
            .returning(|_, _, _| Ok("pl-empty".to_string()));
        playlists.expect_add_tracks().times(0);

        let outcome = reconciler(playlists).reconcile("Empty", &[]).await.unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.added, 0);
    }
}
