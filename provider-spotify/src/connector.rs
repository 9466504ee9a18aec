//! Spotify Web API connector
//!
//! Implements the `CatalogSearch` and `PlaylistService` traits against the
//! Spotify Web API.

use async_trait::async_trait;
use bridge_traits::catalog::{CatalogHit, CatalogSearch};
use bridge_traits::error::Result;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::playlist::{PlaylistService, RemotePlaylist, MAX_TRACKS_PER_ADD};
use core_auth::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::SpotifyError;
use crate::types::{
    AddTracksRequest, CreatePlaylistRequest, Page, PlaylistObject, PlaylistTrackItem,
    SearchResponse, SnapshotResponse,
};

/// Spotify Web API base URL
const API_BASE: &str = "https://api.spotify.com/v1";

/// Page size for list endpoints (Spotify maximum is 50)
const PAGE_LIMIT: u32 = 50;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Spotify Web API connector
///
/// Implements [`CatalogSearch`] for track search and [`PlaylistService`]
/// for playlist reads and writes, on behalf of the session user.
///
/// # Example
///
/// ```ignore
/// use provider_spotify::SpotifyConnector;
/// use bridge_traits::catalog::CatalogSearch;
///
/// let connector = SpotifyConnector::new(http_client, session);
/// let hits = connector.search_tracks("Mr. Brightside The Killers", Some("DK"), 1).await?;
/// ```
pub struct SpotifyConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Authenticated session (bearer token and user id)
    session: Session,
}

impl SpotifyConnector {
    /// Create a new connector.
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `session` - Authenticated session; playlist writes require a
    ///   user-authorized token with the playlist-modify scopes
    pub fn new(http_client: Arc<dyn HttpClient>, session: Session) -> Self {
        Self {
            http_client,
            session,
        }
    }

    /// Interpret an API response: 2xx parses as `T`, everything else maps
    /// to a [`SpotifyError`].
    fn parse_response<T: DeserializeOwned>(
        response: bridge_traits::http::HttpResponse,
    ) -> Result<T> {
        match response.status {
            status if (200..300).contains(&status) => {
                serde_json::from_slice(&response.body).map_err(|e| {
                    SpotifyError::ParseError(format!("Failed to parse API response: {}", e)).into()
                })
            }
            401 => Err(SpotifyError::Unauthorized(
                response.text().unwrap_or_default(),
            )
            .into()),
            429 => {
                let retry_after_seconds = response
                    .headers
                    .get("retry-after")
                    .or_else(|| response.headers.get("Retry-After"))
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1);
                Err(SpotifyError::RateLimitExceeded {
                    retry_after_seconds,
                }
                .into())
            }
            status => Err(SpotifyError::ApiError {
                status_code: status,
                message: response.text().unwrap_or_default(),
            }
            .into()),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(self.session.token().secret())
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self.http_client.execute(request).await?;
        Self::parse_response(response)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: String,
        body: &B,
    ) -> Result<T> {
        let request = HttpRequest::new(HttpMethod::Post, url)
            .bearer_token(self.session.token().secret())
            .header("Accept", "application/json")
            .json(body)?
            .timeout(REQUEST_TIMEOUT);

        let response = self.http_client.execute(request).await?;
        Self::parse_response(response)
    }

    /// Fetch every page of a list endpoint, following `next` links.
    async fn collect_pages<T: DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut url = Some(first_url);

        while let Some(current) = url {
            let page: Page<T> = self.get_json(current).await?;
            items.extend(page.items);
            url = page.next;
        }

        Ok(items)
    }
}

#[async_trait]
impl CatalogSearch for SpotifyConnector {
    #[instrument(skip(self), fields(market = ?market, limit = limit))]
    async fn search_tracks(
        &self,
        query: &str,
        market: Option<&str>,
        limit: u32,
    ) -> Result<Vec<CatalogHit>> {
        let mut url = format!(
            "{}/search?q={}&type=track&limit={}",
            API_BASE,
            urlencoding::encode(query),
            limit
        );
        if let Some(market) = market {
            url.push_str(&format!("&market={}", urlencoding::encode(market)));
        }

        let response: SearchResponse = self.get_json(url).await?;

        let hits = response
            .tracks
            .items
            .into_iter()
            .map(|track| CatalogHit {
                id: track.id,
                name: track.name,
                album_name: track.album.name,
                artist_name: track
                    .artists
                    .into_iter()
                    .next()
                    .map(|artist| artist.name)
                    .unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        debug!(hits = hits.len(), "Catalog search completed");
        Ok(hits)
    }
}

#[async_trait]
impl PlaylistService for SpotifyConnector {
    #[instrument(skip(self))]
    async fn list_playlists(&self) -> Result<Vec<RemotePlaylist>> {
        let url = format!("{}/me/playlists?limit={}", API_BASE, PAGE_LIMIT);
        let playlists: Vec<PlaylistObject> = self.collect_pages(url).await?;

        info!(count = playlists.len(), "Listed user playlists");

        Ok(playlists
            .into_iter()
            .map(|p| RemotePlaylist {
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    #[instrument(skip(self, description), fields(name = %name))]
    async fn create_playlist(
        &self,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<String> {
        let url = format!("{}/users/{}/playlists", API_BASE, self.session.user_id());
        let body = CreatePlaylistRequest {
            name,
            public,
            description,
        };

        let playlist: PlaylistObject = self.post_json(url, &body).await?;

        info!(playlist_id = %playlist.id, "Created playlist");
        Ok(playlist.id)
    }

    #[instrument(skip(self), fields(playlist_id = %playlist_id))]
    async fn playlist_track_ids(&self, playlist_id: &str) -> Result<HashSet<String>> {
        let url = format!(
            "{}/playlists/{}/tracks?fields=items(track(id)),next&limit=100",
            API_BASE, playlist_id
        );
        let items: Vec<PlaylistTrackItem> = self.collect_pages(url).await?;

        // Local files carry a null id and can never collide with catalog ids.
        let ids: HashSet<String> = items
            .into_iter()
            .filter_map(|item| item.track.and_then(|track| track.id))
            .collect();

        debug!(count = ids.len(), "Fetched playlist membership");
        Ok(ids)
    }

    #[instrument(skip(self, track_ids), fields(playlist_id = %playlist_id, count = track_ids.len()))]
    async fn add_tracks(&self, playlist_id: &str, track_ids: &[String]) -> Result<()> {
        if track_ids.len() > MAX_TRACKS_PER_ADD {
            return Err(SpotifyError::TooManyTracks {
                count: track_ids.len(),
                limit: MAX_TRACKS_PER_ADD,
            }
            .into());
        }

        let url = format!("{}/playlists/{}/tracks", API_BASE, playlist_id);
        let body = AddTracksRequest {
            uris: track_ids
                .iter()
                .map(|id| format!("spotify:track:{}", id))
                .collect(),
        };

        let snapshot: SnapshotResponse = self.post_json(url, &body).await?;

        debug!(snapshot_id = %snapshot.snapshot_id, "Added tracks to playlist");
        Ok(())
    }
}
