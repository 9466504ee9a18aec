//! Spotify Web API response types
//!
//! Data structures for deserializing Spotify Web API responses. The API's
//! JSON uses snake_case field names throughout.

use serde::{Deserialize, Serialize};

/// A page of results, as returned by every Spotify list endpoint.
///
/// See: https://developer.spotify.com/documentation/web-api/concepts/pagination
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Absolute URL of the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,

    /// Total number of items across all pages
    #[serde(default)]
    pub total: Option<u64>,
}

/// GET /v1/search response (track-type searches only)
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Paged track results
    pub tracks: Page<TrackObject>,
}

/// A full track object
#[derive(Debug, Deserialize)]
pub struct TrackObject {
    /// Track ID
    pub id: String,

    /// Track name
    pub name: String,

    /// Album the track appears on
    pub album: AlbumObject,

    /// Artists, primary first
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

/// Simplified album object
#[derive(Debug, Deserialize)]
pub struct AlbumObject {
    /// Album name
    pub name: String,
}

/// Simplified artist object
#[derive(Debug, Deserialize)]
pub struct ArtistObject {
    /// Artist name
    pub name: String,
}

/// A playlist as returned by GET /v1/me/playlists
#[derive(Debug, Deserialize)]
pub struct PlaylistObject {
    /// Playlist ID
    pub id: String,

    /// Display name
    pub name: String,
}

/// One entry of GET /v1/playlists/{id}/tracks
#[derive(Debug, Deserialize)]
pub struct PlaylistTrackItem {
    /// The track; null for removed/unavailable entries
    #[serde(default)]
    pub track: Option<PlaylistTrackRef>,
}

/// Track reference inside a playlist entry
#[derive(Debug, Deserialize)]
pub struct PlaylistTrackRef {
    /// Track ID; null for local files, which have no catalog id
    #[serde(default)]
    pub id: Option<String>,
}

/// POST /v1/users/{user_id}/playlists request body
#[derive(Debug, Serialize)]
pub struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
    pub public: bool,
    pub description: &'a str,
}

/// POST /v1/playlists/{id}/tracks request body
#[derive(Debug, Serialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

/// POST /v1/playlists/{id}/tracks response body
#[derive(Debug, Deserialize)]
pub struct SnapshotResponse {
    /// Version identifier of the playlist after the mutation
    pub snapshot_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "tracks": {
                "items": [
                    {
                        "id": "3n3Ppam7vgaVa1iaRUc9Lp",
                        "name": "Mr. Brightside",
                        "album": { "name": "Hot Fuss" },
                        "artists": [ { "name": "The Killers" } ]
                    }
                ],
                "next": null,
                "total": 1
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.tracks.items.len(), 1);
        let track = &response.tracks.items[0];
        assert_eq!(track.id, "3n3Ppam7vgaVa1iaRUc9Lp");
        assert_eq!(track.name, "Mr. Brightside");
        assert_eq!(track.album.name, "Hot Fuss");
        assert_eq!(track.artists[0].name, "The Killers");
    }

    #[test]
    fn test_deserialize_empty_search_response() {
        let json = r#"{ "tracks": { "items": [], "next": null, "total": 0 } }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(response.tracks.items.is_empty());
    }

    #[test]
    fn test_deserialize_playlist_page() {
        let json = r#"{
            "items": [
                { "id": "pl1", "name": "Warm mornings" },
                { "id": "pl2", "name": "Thumbs Up" }
            ],
            "next": "https://api.spotify.com/v1/me/playlists?offset=50&limit=50",
            "total": 72
        }"#;

        let page: Page<PlaylistObject> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].name, "Thumbs Up");
        assert!(page.next.is_some());
    }

    #[test]
    fn test_deserialize_playlist_tracks_with_local_entry() {
        let json = r#"{
            "items": [
                { "track": { "id": "t1" } },
                { "track": { "id": null } },
                { "track": null }
            ],
            "next": null
        }"#;

        let page: Page<PlaylistTrackItem> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(
            page.items[0].track.as_ref().and_then(|t| t.id.as_deref()),
            Some("t1")
        );
        assert!(page.items[1].track.as_ref().unwrap().id.is_none());
        assert!(page.items[2].track.is_none());
    }

    #[test]
    fn test_serialize_create_playlist_request() {
        let request = CreatePlaylistRequest {
            name: "Warm mornings",
            public: false,
            description: "Imported",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "Warm mornings");
        assert_eq!(json["public"], false);
    }
}
