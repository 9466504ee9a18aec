//! # Record Normalizer
//!
//! Turns raw archive rows into canonical [`Track`] records.
//!
//! ## Overview
//!
//! The archive reader (an external collaborator) flattens each per-playlist
//! export into rows mapping column names to raw JSON values. This module:
//!
//! - decodes HTML character entities in title and artist (`&#39;` → `'`),
//!   before anything downstream compares or searches on them
//! - drops rows lacking a non-empty title or artist
//! - suppresses duplicate rows by the (title, artist, album, playlist)
//!   tuple, under a configurable policy
//! - derives `duration_minutes` from the raw millisecond column when present
//!
//! The pass is a pure transformation. Structurally malformed rows are fatal
//! to the whole pass rather than per-row recoverable, because the archive's
//! structure is assumed authoritative.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::{LibraryError, Result};
use crate::model::Track;

/// Expected archive columns.
pub const COL_TITLE: &str = "Title";
pub const COL_ARTIST: &str = "Artist";
pub const COL_ALBUM: &str = "Album";
pub const COL_PLAYLIST: &str = "Playlist";
pub const COL_DURATION_MS: &str = "Duration (ms)";
pub const COL_POSITION: &str = "Playlist Index";

/// One raw archive row: column name to raw value, schema already flattened
/// by the archive reader.
pub type RawRow = serde_json::Map<String, Value>;

/// What to do with rows sharing an identical dedup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Remove every copy of a duplicated key. Ambiguous duplicates are
    /// excluded entirely rather than one copy being kept arbitrarily.
    #[default]
    DropAllCopies,
    /// Keep the first occurrence, drop the rest.
    KeepFirst,
}

/// Options for a normalization pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub dedup: DedupPolicy,
}

/// Normalize raw archive rows into canonical tracks.
///
/// Row order is preserved. Rows without a non-empty title or artist are
/// dropped; duplicate keys are handled per `options.dedup`.
///
/// # Errors
///
/// Returns [`LibraryError::MalformedRow`] on the first row whose values
/// contradict the archive schema (wrong value types, missing playlist
/// column). The error names the row index so the source export can be
/// fixed.
pub fn normalize_rows(rows: &[RawRow], options: NormalizeOptions) -> Result<Vec<Track>> {
    let mut tracks = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let title = match text_field(row, COL_TITLE, index)? {
            Some(value) => decode_entities(&value),
            None => continue,
        };
        let artist = match text_field(row, COL_ARTIST, index)? {
            Some(value) => decode_entities(&value),
            None => continue,
        };
        if title.is_empty() || artist.is_empty() {
            continue;
        }

        // The archive reader derives the playlist name from the file path,
        // so its absence is a structural defect, not a bad row value.
        let playlist = text_field(row, COL_PLAYLIST, index)?.ok_or_else(|| {
            LibraryError::MalformedRow {
                index,
                reason: format!("missing required column '{}'", COL_PLAYLIST),
            }
        })?;

        let album = text_field(row, COL_ALBUM, index)?;
        let duration_minutes = numeric_field(row, COL_DURATION_MS, index)?
            .map(|ms| ms / 60_000.0);
        let position = numeric_field(row, COL_POSITION, index)?.map(|p| p as u32);

        tracks.push(Track {
            title,
            artist,
            album,
            playlist,
            position,
            duration_minutes,
        });
    }

    let deduped = apply_dedup(tracks, options.dedup);
    debug!(
        rows = rows.len(),
        tracks = deduped.len(),
        "Normalized archive rows"
    );

    Ok(deduped)
}

fn apply_dedup(tracks: Vec<Track>, policy: DedupPolicy) -> Vec<Track> {
    let mut counts: HashMap<(String, String, Option<String>, String), usize> = HashMap::new();
    for track in &tracks {
        *counts
            .entry((
                track.title.clone(),
                track.artist.clone(),
                track.album.clone(),
                track.playlist.clone(),
            ))
            .or_insert(0) += 1;
    }

    match policy {
        DedupPolicy::DropAllCopies => tracks
            .into_iter()
            .filter(|track| {
                counts[&(
                    track.title.clone(),
                    track.artist.clone(),
                    track.album.clone(),
                    track.playlist.clone(),
                )] == 1
            })
            .collect(),
        DedupPolicy::KeepFirst => {
            let mut seen = HashMap::new();
            tracks
                .into_iter()
                .filter(|track| {
                    seen.insert(
                        (
                            track.title.clone(),
                            track.artist.clone(),
                            track.album.clone(),
                            track.playlist.clone(),
                        ),
                        (),
                    )
                    .is_none()
                })
                .collect()
        }
    }
}

/// Decode HTML character entities (`&#39;`, `&amp;`, ...).
fn decode_entities(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Read a column as text. Numbers are accepted and rendered as text (CSV
/// readers sometimes type bare numerics); null or absent is `None`; any
/// other value type is a malformed row.
fn text_field(row: &RawRow, column: &str, index: usize) -> Result<Option<String>> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(LibraryError::MalformedRow {
            index,
            reason: format!("column '{}' holds a non-scalar value: {}", column, other),
        }),
    }
}

/// Read a column as a number. Numeric strings are accepted; a non-numeric
/// string is treated as absent (exports leave stray text in unused
/// columns); any other value type is a malformed row.
fn numeric_field(row: &RawRow, column: &str, index: usize) -> Result<Option<f64>> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => Ok(s.trim().parse::<f64>().ok()),
        Some(other) => Err(LibraryError::MalformedRow {
            index,
            reason: format!("column '{}' holds a non-scalar value: {}", column, other),
        }),
    }
}
