//! # Catalog Track Resolver
//!
//! Maps normalized library tracks onto destination catalog entries.
//!
//! ## Overview
//!
//! For each track the resolver issues one free-text search ("title artist"),
//! scoped to the configured market. An empty scoped result gets exactly one
//! unscoped retry; an empty unscoped result leaves the track unresolved,
//! which is a normal outcome, not an error. The top-ranked hit is always the
//! one taken.
//!
//! Match quality is never stored. [`ResolvedTrack::match_status`] derives it
//! on demand from the source fields and whatever the catalog returned.

use bridge_traits::catalog::{CatalogHit, CatalogSearch};
use core_library::Track;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::Result;

/// Quality of a catalog match, derived from the stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    /// Catalog title and artist equal the source ones (case-insensitive)
    Exact,

    /// A hit was taken but title or artist differ from the source
    Approximate,

    /// No catalog hit, scoped or unscoped
    Unresolved,
}

/// A library track and the catalog entry it resolved to, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTrack {
    /// The source track
    pub track: Track,

    /// Catalog track id of the accepted hit
    pub catalog_id: Option<String>,

    /// Track name as the catalog spells it
    pub catalog_name: Option<String>,

    /// Album name of the accepted hit
    pub catalog_album: Option<String>,

    /// Primary artist of the accepted hit
    pub catalog_artist: Option<String>,

    /// The query text that produced (or failed to produce) the hit
    pub match_query: String,
}

impl ResolvedTrack {
    /// Whether a catalog entry was found for this track.
    pub fn is_resolved(&self) -> bool {
        self.catalog_id.is_some()
    }

    /// Derives the match quality from the source and catalog fields.
    pub fn match_status(&self) -> MatchStatus {
        if self.catalog_id.is_none() {
            return MatchStatus::Unresolved;
        }

        // Unicode-aware folding; catalog metadata is frequently non-ASCII.
        let title_matches = self
            .catalog_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == self.track.title.to_lowercase());
        let artist_matches = self
            .catalog_artist
            .as_deref()
            .is_some_and(|artist| artist.to_lowercase() == self.track.artist.to_lowercase());

        if title_matches && artist_matches {
            MatchStatus::Exact
        } else {
            MatchStatus::Approximate
        }
    }
}

/// Resolves library tracks against a destination catalog.
///
/// The resolver is read-only and issues each search exactly once (plus the
/// single unscoped fallback); retry and backoff belong to the HTTP client
/// behind the catalog connector.
pub struct TrackResolver {
    /// Catalog search implementation
    catalog: Arc<dyn CatalogSearch>,

    /// Market scoping searches; `None` searches the global catalog directly
    market: Option<String>,
}

impl TrackResolver {
    /// Create a new resolver.
    pub fn new(catalog: Arc<dyn CatalogSearch>, market: Option<String>) -> Self {
        Self { catalog, market }
    }

    /// Resolve one track against the catalog.
    ///
    /// # Errors
    ///
    /// Fails only on transport problems. A track with no catalog hit comes
    /// back as an unresolved [`ResolvedTrack`].
    #[instrument(skip(self, track), fields(title = %track.title, artist = %track.artist))]
    pub async fn resolve(&self, track: Track) -> Result<ResolvedTrack> {
        let query = format!("{} {}", track.title, track.artist);

        let mut hits = self
            .catalog
            .search_tracks(&query, self.market.as_deref(), 1)
            .await?;

        if hits.is_empty() && self.market.is_some() {
            debug!("Scoped search empty, retrying without market");
            hits = self.catalog.search_tracks(&query, None, 1).await?;
        }

        let resolved = match hits.into_iter().next() {
            Some(CatalogHit {
                id,
                name,
                album_name,
                artist_name,
            }) => ResolvedTrack {
                track,
                catalog_id: Some(id),
                catalog_name: Some(name),
                catalog_album: Some(album_name),
                catalog_artist: Some(artist_name),
                match_query: query,
            },
            None => {
                debug!("No catalog hit");
                ResolvedTrack {
                    track,
                    catalog_id: None,
                    catalog_name: None,
                    catalog_album: None,
                    catalog_artist: None,
                    match_query: query,
                }
            }
        };

        Ok(resolved)
    }
}
