//! Playlist Provider Abstraction
//!
//! Playlist CRUD against the destination service, scoped to the
//! authenticated user. The provider is the source of truth for playlist
//! membership; nothing is cached across runs.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::error::Result;

/// A playlist as listed from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePlaylist {
    /// Provider-assigned playlist identifier
    pub id: String,

    /// Display name
    pub name: String,
}

/// Playlist operations against the destination service.
///
/// All mutating calls apply to playlists owned by the authenticated user.
/// `add_tracks` accepts at most [`MAX_TRACKS_PER_ADD`] ids per call; batching
/// above that limit is the caller's responsibility.
#[async_trait]
pub trait PlaylistService: Send + Sync {
    /// List the authenticated user's playlists (all pages).
    async fn list_playlists(&self) -> Result<Vec<RemotePlaylist>>;

    /// Create a playlist and return its provider-assigned id.
    async fn create_playlist(&self, name: &str, public: bool, description: &str)
        -> Result<String>;

    /// Fetch the set of track ids currently in the playlist (all pages).
    async fn playlist_track_ids(&self, playlist_id: &str) -> Result<HashSet<String>>;

    /// Append tracks to a playlist, in the given order.
    ///
    /// # Errors
    ///
    /// Fails if `track_ids` exceeds [`MAX_TRACKS_PER_ADD`], in addition to
    /// the usual transport errors.
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()>;
}

/// Hard provider limit on items per add-tracks call.
pub const MAX_TRACKS_PER_ADD: usize = 100;
