//! # Migration Pipeline
//!
//! Drives a whole migration run: group tracks by source playlist, resolve
//! them against the catalog, reconcile each destination playlist, report.
//!
//! ## Overview
//!
//! Playlists are processed one at a time, in the order they first appear in
//! the normalized track list. Within a playlist, catalog resolution may
//! overlap up to the configured window (results keep track order); all
//! writes stay sequential. A transport failure sinks only the playlist it
//! hit, expired credentials sink the run.

use bridge_traits::catalog::CatalogSearch;
use bridge_traits::playlist::PlaylistService;
use core_library::Track;
use core_runtime::config::MigrationConfig;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{MigrateError, Result};
use crate::reconcile::{PlaylistReconciler, ReconcileOutcome};
use crate::resolver::{MatchStatus, ResolvedTrack, TrackResolver};

/// Outcome of one playlist's migration.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistReport {
    /// Source playlist name
    pub playlist: String,

    /// Tracks the playlist carried after normalization
    pub total: usize,

    /// Tracks that resolved to a catalog entry (exact or approximate)
    pub matched: usize,

    /// Exact matches among `matched`
    pub exact: usize,

    /// Approximate matches among `matched`
    pub approximate: usize,

    /// Tracks with no catalog hit; listed so they can be handled by hand
    pub unresolved: Vec<Track>,

    /// Reconciliation result, when it ran to completion
    pub outcome: Option<ReconcileOutcome>,

    /// Error message when this playlist failed mid-way
    pub failure: Option<String>,
}

impl PlaylistReport {
    /// Whether the playlist migrated without errors.
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Aggregate outcome of a migration run.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    /// Per-playlist results, in processing order
    pub playlists: Vec<PlaylistReport>,
}

impl MigrationReport {
    /// Total tracks across all playlists.
    pub fn total_tracks(&self) -> usize {
        self.playlists.iter().map(|p| p.total).sum()
    }

    /// Tracks that resolved to a catalog entry.
    pub fn total_matched(&self) -> usize {
        self.playlists.iter().map(|p| p.matched).sum()
    }

    /// Tracks with no catalog hit.
    pub fn total_unresolved(&self) -> usize {
        self.playlists.iter().map(|p| p.unresolved.len()).sum()
    }

    /// Track ids actually uploaded in this run.
    pub fn total_added(&self) -> usize {
        self.playlists
            .iter()
            .filter_map(|p| p.outcome.as_ref())
            .map(|o| o.added)
            .sum()
    }

    /// Names of playlists that failed mid-way.
    pub fn failed_playlists(&self) -> Vec<&str> {
        self.playlists
            .iter()
            .filter(|p| !p.succeeded())
            .map(|p| p.playlist.as_str())
            .collect()
    }
}

/// End-to-end migration driver.
pub struct MigrationPipeline {
    resolver: TrackResolver,
    reconciler: PlaylistReconciler,
    resolve_window: usize,
}

impl MigrationPipeline {
    /// Create a pipeline from connectors and a validated configuration.
    pub fn new(
        catalog: Arc<dyn CatalogSearch>,
        playlists: Arc<dyn PlaylistService>,
        config: MigrationConfig,
    ) -> Self {
        let resolver = TrackResolver::new(catalog, config.market.clone());
        let reconciler = PlaylistReconciler::new(
            playlists,
            config.batch_limit,
            config.playlist_public,
            config.playlist_description,
        );

        Self {
            resolver,
            reconciler,
            resolve_window: config.resolve_window,
        }
    }

    /// Run the migration for every playlist in `tracks`.
    ///
    /// # Errors
    ///
    /// Only expired credentials abort the run, surfaced as
    /// [`MigrateError::RunAborted`] carrying the reports of every playlist
    /// that finished before the abort. Any other failure is recorded on the
    /// affected playlist's report and processing moves on.
    #[instrument(skip(self, tracks), fields(tracks = tracks.len()))]
    pub async fn run(&self, tracks: &[Track]) -> Result<MigrationReport> {
        let groups = group_by_playlist(tracks);
        info!(playlists = groups.len(), "Starting migration run");

        let mut reports = Vec::with_capacity(groups.len());
        for (name, mut entries) in groups {
            // Stable sort; entries without an exported position go last in
            // their original relative order.
            entries.sort_by_key(|t| t.position.unwrap_or(u32::MAX));
            match self.process_playlist(&name, entries).await {
                Ok(report) => reports.push(report),
                // process_playlist only lets fatal errors escape; keep the
                // finished playlists' results with the error.
                Err(error) => {
                    warn!(playlist = %name, %error, "Aborting migration run");
                    return Err(MigrateError::RunAborted {
                        completed: MigrationReport { playlists: reports },
                        cause: error.to_string(),
                    });
                }
            }
        }

        let report = MigrationReport { playlists: reports };
        info!(
            matched = report.total_matched(),
            unresolved = report.total_unresolved(),
            added = report.total_added(),
            failed = report.failed_playlists().len(),
            "Migration run finished"
        );

        Ok(report)
    }

    async fn process_playlist(&self, name: &str, entries: Vec<Track>) -> Result<PlaylistReport> {
        let total = entries.len();

        // Resolution windows overlap; `buffered` keeps results in order.
        let results: Vec<Result<ResolvedTrack>> =
            stream::iter(entries.into_iter().map(|track| self.resolver.resolve(track)))
                .buffered(self.resolve_window)
                .collect()
                .await;

        let mut resolved = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(track) => resolved.push(track),
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    warn!(playlist = %name, %error, "Resolution failed, skipping playlist");
                    return Ok(failed_report(name, total, error.to_string()));
                }
            }
        }

        let mut exact = 0;
        let mut approximate = 0;
        let mut unresolved = Vec::new();
        let mut candidate_ids = Vec::new();
        for track in resolved {
            match track.match_status() {
                MatchStatus::Exact => exact += 1,
                MatchStatus::Approximate => approximate += 1,
                MatchStatus::Unresolved => {
                    unresolved.push(track.track);
                    continue;
                }
            }
            if let Some(id) = track.catalog_id {
                candidate_ids.push(id);
            }
        }

        let (outcome, failure) = match self.reconciler.reconcile(name, &candidate_ids).await {
            Ok(outcome) => (Some(outcome), None),
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                warn!(playlist = %name, %error, "Reconciliation failed");
                (None, Some(error.to_string()))
            }
        };

        Ok(PlaylistReport {
            playlist: name.to_string(),
            total,
            matched: exact + approximate,
            exact,
            approximate,
            unresolved,
            outcome,
            failure,
        })
    }
}

fn failed_report(name: &str, total: usize, failure: String) -> PlaylistReport {
    PlaylistReport {
        playlist: name.to_string(),
        total,
        matched: 0,
        exact: 0,
        approximate: 0,
        unresolved: Vec::new(),
        outcome: None,
        failure: Some(failure),
    }
}

/// Groups tracks by source playlist, preserving first-appearance order of
/// the playlist names and the relative order of tracks within each.
fn group_by_playlist(tracks: &[Track]) -> Vec<(String, Vec<Track>)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Track>)> = Vec::new();

    for track in tracks {
        let slot = *slots.entry(track.playlist.as_str()).or_insert_with(|| {
            groups.push((track.playlist.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(track.clone());
    }

    groups
}
