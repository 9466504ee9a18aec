//! # Library Model & Record Normalizer
//!
//! The canonical data model for an exported music library, plus the
//! normalization pass that produces it from raw archive rows.
//!
//! ## Overview
//!
//! - **Model** (`model`): [`Track`] records and their dedup identity
//! - **Normalizer** (`normalize`): HTML-entity decoding, null-row removal,
//!   duplicate suppression, duration derivation
//!
//! Tracks are produced once per run and are immutable afterwards. The
//! normalizer is pure; it only fails when the archive rows are structurally
//! malformed.

pub mod error;
pub mod model;
pub mod normalize;

pub use error::{LibraryError, Result};
pub use model::{Track, TrackKey};
pub use normalize::{normalize_rows, DedupPolicy, NormalizeOptions, RawRow};
