//! Library data model
//!
//! Canonical track records produced by normalization. Records are built
//! once per run from the archive rows and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// One exported library entry, after normalization.
///
/// Invariant: `title` and `artist` are non-empty and HTML-entity decoded.
/// Rows that cannot satisfy this are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Primary artist
    pub artist: String,

    /// Album name, when the export carried one
    pub album: Option<String>,

    /// Name of the source playlist this entry belongs to
    pub playlist: String,

    /// Original ordering within the source playlist, when exported
    pub position: Option<u32>,

    /// Duration in minutes, derived from the raw millisecond field
    pub duration_minutes: Option<f64>,
}

impl Track {
    /// Identity used for duplicate suppression.
    pub fn key(&self) -> TrackKey<'_> {
        TrackKey {
            title: &self.title,
            artist: &self.artist,
            album: self.album.as_deref(),
            playlist: &self.playlist,
        }
    }
}

/// Deduplication identity: the (title, artist, album, playlist) tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackKey<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub album: Option<&'a str>,
    pub playlist: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, album: Option<&str>) -> Track {
        Track {
            title: title.to_string(),
            artist: "Artist".to_string(),
            album: album.map(str::to_string),
            playlist: "Mix".to_string(),
            position: None,
            duration_minutes: None,
        }
    }

    #[test]
    fn test_key_equality() {
        assert_eq!(track("A", Some("X")).key(), track("A", Some("X")).key());
        assert_ne!(track("A", Some("X")).key(), track("A", None).key());
        assert_ne!(track("A", Some("X")).key(), track("B", Some("X")).key());
    }
}
